//! Pointer picking

use crate::math::Ray;
use crate::scene::{CameraPose, NodeId, PerspectiveCamera, Scene};
use vista_core::{Size, Vec2, Vec3};

/// Raycast hit result
#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    /// Node that was hit
    pub node: NodeId,
    /// Distance from ray origin
    pub distance: f32,
    /// Hit position in world space
    pub point: Vec3,
}

/// Convert a pointer position relative to the widget rectangle into
/// normalized device coordinates
///
/// `viewport` is the size allocated to the widget, not the window size.
/// Returns `None` for a degenerate viewport.
pub fn pointer_to_ndc(pointer: Vec2, viewport: Size) -> Option<Vec2> {
    if viewport.is_empty() {
        return None;
    }
    Some(Vec2::new(
        (pointer.x / viewport.width) * 2.0 - 1.0,
        -(pointer.y / viewport.height) * 2.0 + 1.0,
    ))
}

/// Casts rays into a [`Scene`] (like Three.js Raycaster)
#[derive(Clone, Debug)]
pub struct Raycaster {
    ray: Ray,
}

impl Raycaster {
    /// Create from an explicit world-space ray
    pub fn new(ray: Ray) -> Self {
        Self { ray }
    }

    /// Create a ray from the camera through a point in NDC
    pub fn from_camera(ndc: Vec2, camera: &PerspectiveCamera, pose: &CameraPose) -> Self {
        let direction = camera.ray_direction(ndc.x, ndc.y, pose);
        Self::new(Ray::new(pose.position, direction))
    }

    /// Re-aim from the camera through a point in NDC
    pub fn set_from_camera(&mut self, ndc: Vec2, camera: &PerspectiveCamera, pose: &CameraPose) {
        *self = Self::from_camera(ndc, camera, pose);
    }

    /// The world-space ray
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Every visible mesh hit by the ray, nearest first
    ///
    /// One hit per mesh node (its closest triangle).
    pub fn intersect(&self, scene: &Scene) -> Vec<Hit> {
        let mut hits = Vec::new();

        for (id, world, mesh) in scene.visible_meshes() {
            let bounds = mesh.geometry.bounding_box.transformed(&world);
            if self.ray.intersect_box(&bounds).is_none() {
                continue;
            }

            let nearest = mesh
                .geometry
                .triangles()
                .filter_map(|[a, b, c]| {
                    self.ray.intersect_triangle(
                        world.transform_point(a),
                        world.transform_point(b),
                        world.transform_point(c),
                    )
                })
                .fold(None, |best: Option<f32>, t| match best {
                    Some(b) if b <= t => Some(b),
                    _ => Some(t),
                });

            if let Some(distance) = nearest {
                hits.push(Hit {
                    node: id,
                    distance,
                    point: self.ray.at(distance),
                });
            }
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Nearest hit, if any
    pub fn intersect_first(&self, scene: &Scene) -> Option<Hit> {
        self.intersect(scene).into_iter().next()
    }
}
