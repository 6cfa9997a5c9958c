//! Lighting
//!
//! The viewer lights its scene with a single shadow-casting directional light.

mod directional;

pub use directional::DirectionalLight;

/// Shadow map configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowConfig {
    /// Shadow map resolution
    pub map_size: u32,
    /// Shadow bias to prevent shadow acne
    pub bias: f32,
    /// Shadow camera near plane
    pub near: f32,
    /// Shadow camera far plane
    pub far: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            map_size: 1024,
            bias: 0.0005,
            near: 0.5,
            far: 500.0,
        }
    }
}
