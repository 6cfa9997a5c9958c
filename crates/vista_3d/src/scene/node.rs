//! Detached node trees

use super::{Mesh, Object3D};
use crate::lights::DirectionalLight;
use crate::math::BoundingBox;
use vista_core::Mat4;

/// What a node contributes to the scene besides its transform
#[derive(Clone, Debug, Default)]
pub enum NodeKind {
    /// Pure transform node grouping its children
    #[default]
    Group,
    /// Renderable geometry
    Mesh(Mesh),
    /// Directional light source
    Light(DirectionalLight),
}

/// A node tree not yet owned by a [`Scene`](super::Scene)
///
/// Asset loaders build these off the render thread; the scene takes them
/// over in [`SceneGraph::add`](super::SceneGraph::add).
#[derive(Clone, Debug, Default)]
pub struct Node {
    /// Debug name (file stem, OBJ object name, ...)
    pub name: String,
    /// Local transform and render flags
    pub transform: Object3D,
    /// Node payload
    pub kind: NodeKind,
    /// Child nodes
    pub children: Vec<Node>,
}

impl Node {
    /// Create an empty group node
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a mesh node
    pub fn mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Mesh(mesh),
            ..Default::default()
        }
    }

    /// Create a light node
    pub fn light(name: impl Into<String>, light: DirectionalLight) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Light(light),
            ..Default::default()
        }
    }

    /// Set the local transform
    pub fn with_transform(mut self, transform: Object3D) -> Self {
        self.transform = transform;
        self
    }

    /// Append a child
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Renderable geometry carried by this node, if any
    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Mutable access to the renderable geometry, if any
    pub fn as_mesh_mut(&mut self) -> Option<&mut Mesh> {
        match &mut self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Visit this node and every descendant, depth first
    pub fn traverse_mut(&mut self, visit: &mut impl FnMut(&mut Node)) {
        visit(self);
        for child in &mut self.children {
            child.traverse_mut(visit);
        }
    }

    /// Visit this node and every descendant, depth first
    pub fn traverse(&self, visit: &mut impl FnMut(&Node)) {
        visit(self);
        for child in &self.children {
            child.traverse(visit);
        }
    }

    /// Number of nodes in this tree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Number of mesh-bearing nodes in this tree
    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |node| {
            if node.as_mesh().is_some() {
                count += 1;
            }
        });
        count
    }

    /// Total triangles across all meshes in this tree
    pub fn triangle_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |node| {
            if let Some(mesh) = node.as_mesh() {
                count += mesh.triangle_count();
            }
        });
        count
    }

    /// Bounds of every mesh in this tree, in the space of this node's parent
    pub fn bounds(&self) -> BoundingBox {
        let mut bounds = BoundingBox::empty();
        self.collect_bounds(&Mat4::IDENTITY, &mut bounds);
        bounds
    }

    fn collect_bounds(&self, parent: &Mat4, bounds: &mut BoundingBox) {
        let matrix = parent.mul(&self.transform.local_matrix());
        if let Some(mesh) = self.as_mesh() {
            if !mesh.geometry.is_empty() {
                bounds.merge(&mesh.geometry.bounding_box.transformed(&matrix));
            }
        }
        for child in &self.children {
            child.collect_bounds(&matrix, bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxGeometry;
    use crate::materials::StandardMaterial;

    fn sample_tree() -> Node {
        Node::group("root")
            .with_child(Node::mesh(
                "a",
                Mesh::new(BoxGeometry::cube(1.0), StandardMaterial::new()),
            ))
            .with_child(Node::group("nested").with_child(Node::mesh(
                "b",
                Mesh::new(BoxGeometry::cube(1.0), StandardMaterial::new()),
            )))
    }

    #[test]
    fn test_counts() {
        let tree = sample_tree();
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.mesh_count(), 2);
        assert_eq!(tree.triangle_count(), 24);
    }

    #[test]
    fn test_bounds_follow_transforms() {
        let tree = Node::group("root")
            .with_transform(Object3D::at(0.0, -1.0, 0.0))
            .with_child(Node::mesh(
                "a",
                Mesh::new(BoxGeometry::cube(1.0), StandardMaterial::new()),
            ));

        let bounds = tree.bounds();
        assert!(bounds.min.abs_diff_eq(vista_core::Vec3::new(-0.5, -1.5, -0.5), 1e-6));
        assert!(bounds.max.abs_diff_eq(vista_core::Vec3::new(0.5, -0.5, 0.5), 1e-6));
        assert!(Node::group("empty").bounds().is_empty());
    }

    #[test]
    fn test_traverse_mut_reaches_nested_meshes() {
        let mut tree = sample_tree();
        tree.traverse_mut(&mut |node| {
            if node.as_mesh().is_some() {
                node.transform.cast_shadows = true;
            }
        });

        let mut flagged = Vec::new();
        tree.traverse(&mut |node| {
            if node.transform.cast_shadows {
                flagged.push(node.name.clone());
            }
        });
        assert_eq!(flagged, vec!["a".to_string(), "b".to_string()]);
    }
}
