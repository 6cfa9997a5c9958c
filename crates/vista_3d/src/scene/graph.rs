//! Scene arena

use super::{Mesh, Node, NodeKind, Object3D};
use crate::lights::DirectionalLight;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use vista_core::Mat4;

new_key_type! {
    /// Handle to a node owned by a [`Scene`]
    pub struct NodeId;
}

/// Mutable container the model swap controller inserts into and removes from
///
/// Implementations own node lifetime: once removed, a node and its subtree are
/// gone and the handle is dead.
pub trait SceneGraph {
    /// Insert a detached tree as a new root and return the root's handle
    fn add(&mut self, node: Node) -> NodeId;

    /// Remove a node and its whole subtree. Returns `false` for unknown handles.
    fn remove(&mut self, id: NodeId) -> bool;
}

/// A node owned by the scene
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Debug name
    pub name: String,
    /// Local transform and render flags
    pub transform: Object3D,
    /// Node payload
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl SceneNode {
    /// Parent node (None for roots)
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
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

    /// Light carried by this node, if any
    pub fn as_light(&self) -> Option<&DirectionalLight> {
        match &self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }
}

/// Arena of scene nodes with parent/child links
#[derive(Default)]
pub struct Scene {
    nodes: SlotMap<NodeId, SceneNode>,
    roots: Vec<NodeId>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a detached tree under an existing node
    ///
    /// Returns `None` if `parent` is not in the scene.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.insert_tree(node, Some(parent));
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(id);
        }
        Some(id)
    }

    fn insert_tree(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let Node {
            name,
            transform,
            kind,
            children,
        } = node;

        let id = self.nodes.insert(SceneNode {
            name,
            transform,
            kind,
            parent,
            children: SmallVec::new(),
        });

        let child_ids: SmallVec<[NodeId; 4]> = children
            .into_iter()
            .map(|child| self.insert_tree(child, Some(id)))
            .collect();

        if let Some(inserted) = self.nodes.get_mut(id) {
            inserted.children = child_ids;
        }
        id
    }

    /// Get a node
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Get a mutable node
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Check if a node is in the scene
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Total node count
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the scene is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root handles in insertion order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of root nodes
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Find the first node with the given name
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    /// Compose local transforms from the root down to `id`
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut node = self.nodes.get(id)?;
        let mut matrix = node.transform.local_matrix();
        while let Some(parent) = node.parent {
            node = self.nodes.get(parent)?;
            matrix = node.transform.local_matrix().mul(&matrix);
        }
        Some(matrix)
    }

    /// Visit every visible node with its world matrix, depth first
    ///
    /// A hidden node hides its entire subtree.
    pub fn visit_visible(&self, mut visit: impl FnMut(NodeId, &SceneNode, &Mat4)) {
        let mut stack: Vec<(NodeId, Mat4)> = self
            .roots
            .iter()
            .rev()
            .map(|&id| (id, Mat4::IDENTITY))
            .collect();

        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if !node.transform.visible {
                continue;
            }
            let world = parent_world.mul(&node.transform.local_matrix());
            visit(id, node, &world);
            for &child in node.children.iter().rev() {
                stack.push((child, world));
            }
        }
    }

    /// Visible meshes with their world matrices
    pub fn visible_meshes(&self) -> Vec<(NodeId, Mat4, &Mesh)> {
        let mut meshes = Vec::new();
        self.visit_visible(|id, _, world| {
            if let Some(node) = self.nodes.get(id) {
                if let Some(mesh) = node.as_mesh() {
                    meshes.push((id, *world, mesh));
                }
            }
        });
        meshes
    }

    /// Collect a node and all its descendants
    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(current) {
                out.push(current);
                stack.extend(node.children.iter().copied());
            }
        }
        out
    }

    /// Remove every node
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
    }
}

impl SceneGraph for Scene {
    fn add(&mut self, node: Node) -> NodeId {
        let id = self.insert_tree(node, None);
        self.roots.push(id);
        id
    }

    fn remove(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };

        match node.parent {
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(parent) {
                    parent_node.children.retain(|child| *child != id);
                }
            }
            None => self.roots.retain(|root| *root != id),
        }

        for doomed in self.subtree(id) {
            self.nodes.remove(doomed);
        }
        true
    }
}
