//! Viewer utilities
//!
//! - [`camera`]: orbit controls
//! - [`loader`]: model fetching and parsing

pub mod camera;
pub mod loader;
