//! Prelude module for common imports
//!
//! ```rust,ignore
//! use vista_3d::prelude::*;
//! ```

// Scene
pub use crate::scene::{
    CameraPose, Mesh, Node, NodeId, NodeKind, Object3D, PerspectiveCamera, Scene, SceneGraph,
    SceneNode,
};

// Geometry
pub use crate::geometry::{BoxGeometry, Geometry, PlaneGeometry, Vertex};

// Materials
pub use crate::materials::{Material, MeshMaterial, ShadowMaterial, Side, StandardMaterial};

// Lights
pub use crate::lights::{DirectionalLight, ShadowConfig};

// Frame output and picking
pub use crate::picking::{pointer_to_ndc, Hit, Raycaster};
pub use crate::render::{build_frame, DrawItem, Frame, LightItem, RenderConfig};

// Model swapping
pub use crate::swap::{
    LoadReport, ModelStyle, ModelSwapController, ReportSink, SwapOutcome, SwapState,
    TracingReporter,
};

// Utilities
pub use crate::utils::camera::{CameraInput, OrbitController};
pub use crate::utils::loader::{AssetLoader, LoadError, ModelParser, ParserRegistry, UrlAssetLoader};

// Core types
pub use vista_core::{Color, Mat4, Quat, Size, Vec2, Vec3};
