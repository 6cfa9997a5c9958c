//! Wavefront OBJ model parser
//!
//! Parses OBJ text using the `tobj` crate. `mtllib` references are not
//! followed: the viewer replaces every material on load anyway.

use super::{LoadError, ModelParser};
use crate::geometry::{Geometry, Vertex};
use crate::materials::StandardMaterial;
use crate::scene::{Mesh, Node};
use std::io::{BufReader, Cursor};

/// Wavefront OBJ model parser
pub struct ObjParser {
    /// Whether to triangulate faces
    pub triangulate: bool,
    /// Whether to generate normals if missing
    pub generate_normals: bool,
}

impl ObjParser {
    /// Create a new OBJ parser with default settings
    pub fn new() -> Self {
        Self {
            triangulate: true,
            generate_normals: true,
        }
    }

    /// Set whether to generate normals if missing
    pub fn with_generate_normals(mut self, generate: bool) -> Self {
        self.generate_normals = generate;
        self
    }
}

impl Default for ObjParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelParser for ObjParser {
    fn parse(&self, name: &str, bytes: &[u8]) -> Result<Node, LoadError> {
        let load_options = tobj::LoadOptions {
            triangulate: self.triangulate,
            single_index: true,
            ..Default::default()
        };

        let mut reader = BufReader::new(Cursor::new(bytes));
        let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_options, |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|e| LoadError::Parse(e.to_string()))?;

        let mut root = Node::group(name);
        for model in &models {
            if let Some(geometry) = convert_model(model, self.generate_normals) {
                root.children.push(Node::mesh(
                    model.name.clone(),
                    Mesh::new(geometry, StandardMaterial::new()),
                ));
            }
        }

        if root.children.is_empty() {
            return Err(LoadError::InvalidData(format!(
                "{name}: no faces found in OBJ data"
            )));
        }

        Ok(root)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["obj"]
    }

    fn name(&self) -> &'static str {
        "Wavefront OBJ Parser"
    }
}

/// Convert a tobj model to geometry; `None` if it has no faces
fn convert_model(model: &tobj::Model, generate_normals: bool) -> Option<Geometry> {
    let mesh = &model.mesh;

    if mesh.positions.is_empty() || mesh.indices.is_empty() {
        return None;
    }

    let vertex_count = mesh.positions.len() / 3;
    let has_normals = mesh.normals.len() >= vertex_count * 3;
    let has_uvs = mesh.texcoords.len() >= vertex_count * 2;

    let vertices: Vec<Vertex> = (0..vertex_count)
        .map(|i| {
            let position = [
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            ];
            let normal = if has_normals {
                [
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    mesh.normals[i * 3 + 2],
                ]
            } else {
                [0.0, 1.0, 0.0]
            };
            let uv = if has_uvs {
                // Flip V coordinate
                [mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1]]
            } else {
                [0.0, 0.0]
            };
            Vertex::new(position, normal, uv)
        })
        .collect();

    let mut geometry = Geometry::from_data(vertices, mesh.indices.clone());

    if !has_normals && generate_normals {
        geometry.compute_flat_normals();
    }

    Some(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
o quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    const TWO_OBJECTS: &str = "\
mtllib scene.mtl
o first
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o second
v 0 0 1
v 1 0 1
v 0 1 1
f 4 5 6
";

    #[test]
    fn test_quad_is_triangulated_with_flat_normals() {
        let node = ObjParser::new().parse("quad", QUAD.as_bytes()).unwrap();

        assert_eq!(node.name, "quad");
        assert_eq!(node.mesh_count(), 1);
        assert_eq!(node.triangle_count(), 2);

        let mesh = node.children[0].as_mesh().unwrap();
        for vertex in &mesh.geometry.vertices {
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_each_object_becomes_a_child() {
        let node = ObjParser::new()
            .parse("scene", TWO_OBJECTS.as_bytes())
            .unwrap();

        let names: Vec<_> = node.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(node.triangle_count(), 2);
    }

    #[test]
    fn test_no_faces_is_invalid() {
        let err = ObjParser::new()
            .parse("empty", b"# nothing here\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidData(_)));
    }
}
