//! Renderer-agnostic frame description
//!
//! [`build_frame`] walks the scene once per tick and flattens it into a
//! [`Frame`]: matrices, lights and draw items in traversal order. GPU
//! submission is up to the host.

use crate::scene::{CameraPose, PerspectiveCamera};
use crate::materials::MeshMaterial;
use crate::scene::{NodeId, Scene};
use vista_core::{Color, Mat4, Size, Vec3};

/// Renderer settings
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Clear color
    pub clear_color: Color,
    /// Enable shadows
    pub shadows_enabled: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::WHITE,
            shadows_enabled: true,
        }
    }
}

/// A directional light resolved to world space
#[derive(Clone, Debug, PartialEq)]
pub struct LightItem {
    pub node: NodeId,
    pub color: Color,
    pub intensity: f32,
    /// World position (shadow camera origin)
    pub position: Vec3,
    /// Normalized direction light travels
    pub direction: Vec3,
    pub cast_shadows: bool,
    pub shadow_map_size: u32,
}

/// One mesh to draw
#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
    pub node: NodeId,
    pub world: Mat4,
    pub material: MeshMaterial,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
    pub triangle_count: usize,
}

/// Everything a renderer needs for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub viewport: Size,
    pub clear_color: Color,
    pub shadows_enabled: bool,
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub lights: Vec<LightItem>,
    pub items: Vec<DrawItem>,
}

impl Frame {
    /// Total triangles across all draw items
    pub fn triangle_count(&self) -> usize {
        self.items.iter().map(|item| item.triangle_count).sum()
    }

    /// Draw item for a node, if it is drawn this frame
    pub fn item(&self, node: NodeId) -> Option<&DrawItem> {
        self.items.iter().find(|item| item.node == node)
    }
}

/// Flatten the visible scene into a [`Frame`]
pub fn build_frame(
    scene: &Scene,
    camera: &PerspectiveCamera,
    pose: &CameraPose,
    viewport: Size,
    config: &RenderConfig,
) -> Frame {
    let mut lights = Vec::new();
    let mut items = Vec::new();

    scene.visit_visible(|id, node, world| {
        if let Some(mesh) = node.as_mesh() {
            if mesh.geometry.is_empty() {
                return;
            }
            items.push(DrawItem {
                node: id,
                world: *world,
                material: mesh.material.clone(),
                cast_shadows: node.transform.cast_shadows,
                receive_shadows: node.transform.receive_shadows,
                triangle_count: mesh.triangle_count(),
            });
        } else if let Some(light) = node.as_light() {
            let position = world.transform_point(Vec3::ZERO);
            lights.push(LightItem {
                node: id,
                color: light.color,
                intensity: light.intensity,
                position,
                direction: light.direction_from(position),
                cast_shadows: light.cast_shadows,
                shadow_map_size: light.shadow.map_size,
            });
        }
    });

    Frame {
        viewport,
        clear_color: config.clear_color,
        shadows_enabled: config.shadows_enabled,
        view: camera.view_matrix(pose),
        projection: camera.projection_matrix(),
        camera_position: pose.position,
        lights,
        items,
    }
}
