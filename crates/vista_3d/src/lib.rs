//! # Vista 3D
//!
//! Scene, camera controls, picking and asynchronous model swapping for the
//! Vista model viewer.
//!
//! This crate provides:
//! - **Scene graph**: a slotmap arena of nodes with transforms, meshes and lights
//! - **Three.js-inspired API**: `Object3D`, `StandardMaterial`, `PerspectiveCamera`, ...
//! - **Orbit controls** and **pointer picking**
//! - **Model swapping**: background loads that replace the displayed model
//!   without gaps or races
//! - **Frame building**: a renderer-agnostic list of what to draw
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vista_3d::prelude::*;
//!
//! let mut scene = Scene::new();
//! let mut models = ModelSwapController::new(Arc::new(UrlAssetLoader::new()), handle);
//! models.set_model("https://example.com/teapot.obj");
//!
//! // every frame
//! models.poll(&mut scene);
//! let frame = build_frame(&scene, &camera, &orbit.update(dt, &input), viewport, &config);
//! ```

// Scene graph
pub mod scene;

// Geometry primitives
pub mod geometry;

// Material system
pub mod materials;

// Lighting
pub mod lights;

// Frame output
pub mod render;

// Pointer picking
pub mod picking;

// Model swapping
pub mod swap;

// Math utilities
pub mod math;

// Camera controls and loaders
pub mod utils;

// Prelude for common imports
pub mod prelude;

// Re-export core types at crate root
pub use geometry::{BoxGeometry, Geometry, PlaneGeometry, Vertex};
pub use lights::DirectionalLight;
pub use materials::{Material, MeshMaterial, ShadowMaterial, Side, StandardMaterial};
pub use math::{BoundingBox, Ray};
pub use picking::{Hit, Raycaster};
pub use render::{build_frame, Frame, RenderConfig};
pub use scene::{
    CameraPose, Mesh, Node, NodeId, Object3D, PerspectiveCamera, Scene, SceneGraph,
};
pub use swap::{ModelSwapController, SwapOutcome};
