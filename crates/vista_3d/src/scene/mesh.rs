//! Mesh payload

use crate::geometry::Geometry;
use crate::materials::MeshMaterial;

/// Renderable geometry paired with the material it is drawn with
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Triangle data in the node's local space
    pub geometry: Geometry,
    /// Surface material
    pub material: MeshMaterial,
}

impl Mesh {
    /// Create a new mesh
    pub fn new(geometry: Geometry, material: impl Into<MeshMaterial>) -> Self {
        Self {
            geometry,
            material: material.into(),
        }
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.geometry.triangle_count()
    }
}
