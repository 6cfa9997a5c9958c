//! Geometry primitive generators

use super::{Geometry, Vertex};

/// Box geometry generator (like Three.js BoxGeometry)
pub struct BoxGeometry;

impl BoxGeometry {
    /// Create a box centered on the origin
    pub fn new(width: f32, height: f32, depth: f32) -> Geometry {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let hd = depth / 2.0;

        // (normal, u axis, v axis) per face; corners are normal*half + ±u ±v
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];
        let half = [hw, hh, hd];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u, v) in faces {
            let offset = vertices.len() as u32;
            for (su, sv, uv) in [
                (-1.0, -1.0, [0.0, 1.0]),
                (1.0, -1.0, [1.0, 1.0]),
                (1.0, 1.0, [1.0, 0.0]),
                (-1.0, 1.0, [0.0, 0.0]),
            ] {
                let mut position = [0.0f32; 3];
                for axis in 0..3 {
                    position[axis] =
                        (normal[axis] + u[axis] * su + v[axis] * sv) * half[axis];
                }
                vertices.push(Vertex::new(position, normal, uv));
            }
            indices.extend_from_slice(&[offset, offset + 1, offset + 2, offset, offset + 2, offset + 3]);
        }

        Geometry::from_data(vertices, indices)
    }

    /// Create a cube
    pub fn cube(size: f32) -> Geometry {
        Self::new(size, size, size)
    }
}

/// Plane geometry generator (like Three.js PlaneGeometry)
///
/// The plane lies in XY facing +Z; rotate it -π/2 about X to lay it flat.
pub struct PlaneGeometry;

impl PlaneGeometry {
    /// Create a plane with given dimensions
    pub fn new(width: f32, height: f32) -> Geometry {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let normal = [0.0, 0.0, 1.0];

        let vertices = vec![
            Vertex::new([-hw, -hh, 0.0], normal, [0.0, 0.0]),
            Vertex::new([hw, -hh, 0.0], normal, [1.0, 0.0]),
            Vertex::new([hw, hh, 0.0], normal, [1.0, 1.0]),
            Vertex::new([-hw, hh, 0.0], normal, [0.0, 1.0]),
        ];
        Geometry::from_data(vertices, vec![0, 1, 2, 0, 2, 3])
    }
}
