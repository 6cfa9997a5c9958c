//! Post-load model normalization

use crate::materials::StandardMaterial;
use crate::scene::Node;
use vista_core::Color;

/// Look applied to every loaded model
#[derive(Clone, Debug, PartialEq)]
pub struct ModelStyle {
    /// Material assigned to every mesh in the model
    pub material: StandardMaterial,
    /// Root height, placing the model on the ground plane
    pub vertical_offset: f32,
}

impl Default for ModelStyle {
    fn default() -> Self {
        Self {
            material: StandardMaterial::with_color(Color::WHITE)
                .roughness(0.1)
                .metalness(0.2),
            vertical_offset: -1.0,
        }
    }
}

/// Prepare a freshly loaded tree for display
///
/// Every node carrying geometry gets the style's material and casts and
/// receives shadows. The root is moved to the style's height and casts
/// shadows. Loader-provided materials are discarded.
pub fn normalize(root: &mut Node, style: &ModelStyle) {
    root.transform.position.y = style.vertical_offset;
    root.transform.cast_shadows = true;

    root.traverse_mut(&mut |node| {
        if let Some(mesh) = node.as_mesh_mut() {
            mesh.material = style.material.clone().into();
            node.transform.cast_shadows = true;
            node.transform.receive_shadows = true;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxGeometry;
    use crate::materials::{MeshMaterial, ShadowMaterial};
    use crate::scene::Mesh;

    #[test]
    fn test_meshes_restyled_groups_untouched() {
        let mut root = Node::group("model")
            .with_child(Node::mesh(
                "part",
                Mesh::new(BoxGeometry::cube(1.0), ShadowMaterial::new(0.5)),
            ))
            .with_child(Node::group("empty"));

        let style = ModelStyle::default();
        normalize(&mut root, &style);

        assert_eq!(root.transform.position.y, -1.0);
        assert!(root.transform.cast_shadows);
        assert!(!root.transform.receive_shadows);

        let part = &root.children[0];
        assert_eq!(
            part.as_mesh().map(|m| &m.material),
            Some(&MeshMaterial::Standard(style.material.clone()))
        );
        assert!(part.transform.cast_shadows && part.transform.receive_shadows);

        let empty = &root.children[1];
        assert!(!empty.transform.cast_shadows && !empty.transform.receive_shadows);
    }

    #[test]
    fn test_default_style_values() {
        let style = ModelStyle::default();
        assert_eq!(style.material.color, Color::WHITE);
        assert_eq!(style.material.roughness, 0.1);
        assert_eq!(style.material.metalness, 0.2);
    }
}
