//! Vertex format and geometry structures

use crate::math::BoundingBox;
use vista_core::Vec3;

/// Vertex data for 3D geometry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// Position in local space
    pub position: [f32; 3],
    /// Normal vector
    pub normal: [f32; 3],
    /// Texture coordinates
    pub uv: [f32; 2],
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            normal: [0.0, 1.0, 0.0],
            uv: [0.0, 0.0],
        }
    }
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    /// Position as a vector
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.position[0], self.position[1], self.position[2])
    }
}

/// Indexed triangle list
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    /// Vertex data
    pub vertices: Vec<Vertex>,
    /// Index data (triangles)
    pub indices: Vec<u32>,
    /// Axis-aligned bounding box in local space
    pub bounding_box: BoundingBox,
}

impl Geometry {
    /// Create empty geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from vertices and indices
    pub fn from_data(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let mut geometry = Self {
            vertices,
            indices,
            bounding_box: BoundingBox::empty(),
        };
        geometry.compute_bounds();
        geometry
    }

    /// Compute bounding volume from vertex data
    pub fn compute_bounds(&mut self) {
        self.bounding_box = BoundingBox::empty();
        for vertex in &self.vertices {
            self.bounding_box.expand_to_include(vertex.position());
        }
    }

    /// Compute flat normals (one normal per face)
    ///
    /// Vertices shared between faces keep the normal of the last face that
    /// touches them.
    pub fn compute_flat_normals(&mut self) {
        for chunk in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [chunk[0] as usize, chunk[1] as usize, chunk[2] as usize];
            let (Some(a), Some(b), Some(c)) = (
                self.vertices.get(i0),
                self.vertices.get(i1),
                self.vertices.get(i2),
            ) else {
                continue;
            };

            let (p0, p1, p2) = (a.position(), b.position(), c.position());
            let normal = (p1 - p0).cross(p2 - p0);
            if normal.length() <= 1e-6 {
                continue;
            }
            let n = normal.normalize();
            for index in [i0, i1, i2] {
                self.vertices[index].normal = [n.x, n.y, n.z];
            }
        }
    }

    /// Iterate triangles as vertex positions, skipping out-of-range indices
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|chunk| {
            let a = self.vertices.get(chunk[0] as usize)?;
            let b = self.vertices.get(chunk[1] as usize)?;
            let c = self.vertices.get(chunk[2] as usize)?;
            Some([a.position(), b.position(), c.position()])
        })
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if there is anything to draw
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_normals_follow_winding() {
        let mut geometry = Geometry::from_data(
            vec![
                Vertex::new([0.0, 0.0, 0.0], [0.0; 3], [0.0; 2]),
                Vertex::new([1.0, 0.0, 0.0], [0.0; 3], [0.0; 2]),
                Vertex::new([0.0, 1.0, 0.0], [0.0; 3], [0.0; 2]),
            ],
            vec![0, 1, 2],
        );
        geometry.compute_flat_normals();
        for vertex in &geometry.vertices {
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_triangles_skip_bad_indices() {
        let geometry = Geometry::from_data(
            vec![Vertex::default(); 3],
            vec![0, 1, 2, 0, 1, 9],
        );
        assert_eq!(geometry.triangle_count(), 2);
        assert_eq!(geometry.triangles().count(), 1);
    }
}
