//! Scene graph
//!
//! Loaders and builders produce detached [`Node`] trees; the [`Scene`] arena
//! owns nodes once they are added and hands out [`NodeId`] handles.

mod camera;
mod graph;
mod mesh;
mod node;
mod object3d;

pub use camera::{CameraPose, PerspectiveCamera};
pub use graph::{NodeId, Scene, SceneGraph, SceneNode};
pub use mesh::Mesh;
pub use node::{Node, NodeKind};
pub use object3d::Object3D;
