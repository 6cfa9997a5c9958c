//! Default viewer scene

use crate::config::ViewerConfig;
use std::f32::consts::FRAC_PI_2;
use vista_3d::prelude::*;

/// Handles to the fixed nodes of the viewer scene
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stage {
    /// Clickable demo cube
    pub cube: Option<NodeId>,
    /// Shadow-catching ground plane
    pub ground: Option<NodeId>,
    /// Directional light
    pub light: Option<NodeId>,
}

/// Populate `scene` with the cube, ground plane and light
pub fn build_stage(scene: &mut Scene, config: &ViewerConfig) -> Stage {
    let mut stage = Stage::default();

    if config.demo_cube.enabled {
        let cube = &config.demo_cube;
        let mesh = Mesh::new(
            BoxGeometry::cube(cube.size),
            StandardMaterial::with_color(Color::from_hex(cube.color)),
        );
        stage.cube = Some(scene.add(
            Node::mesh("demo-cube", mesh).with_transform(Object3D::new().with_shadows(true, false)),
        ));
    }

    if config.ground.enabled {
        let ground = &config.ground;
        let mesh = Mesh::new(
            PlaneGeometry::new(ground.size, ground.size),
            ShadowMaterial::new(ground.shadow_opacity),
        );
        let transform = Object3D::at(0.0, ground.height, 0.0)
            .with_rotation(-FRAC_PI_2, 0.0, 0.0)
            .with_shadows(false, true);
        stage.ground = Some(scene.add(Node::mesh("ground", mesh).with_transform(transform)));
    }

    let light_config = &config.light;
    let mut light = DirectionalLight::new(Color::from_hex(light_config.color), light_config.intensity)
        .shadow_map_size(light_config.shadow_map_size);
    light.cast_shadows = light_config.cast_shadows;
    let [x, y, z] = light_config.position;
    stage.light = Some(scene.add(Node::light("sun", light).with_transform(Object3D::at(x, y, z))));

    tracing::debug!(nodes = scene.len(), "viewer stage built");
    stage
}
