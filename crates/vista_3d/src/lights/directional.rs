//! Directional light

use super::ShadowConfig;
use vista_core::{Color, Vec3};

/// Directional light (like sunlight)
///
/// The light shines from its node's world position toward `target`. Only the
/// direction matters for shading; the position places the shadow camera.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Light color
    pub color: Color,
    /// Light intensity
    pub intensity: f32,
    /// World-space point the light aims at
    pub target: Vec3,
    /// Whether this light casts shadows
    pub cast_shadows: bool,
    /// Shadow configuration
    pub shadow: ShadowConfig,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.0,
            target: Vec3::ZERO,
            cast_shadows: false,
            shadow: ShadowConfig::default(),
        }
    }
}

impl DirectionalLight {
    /// Create a new directional light
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            ..Default::default()
        }
    }

    /// Create a white directional light
    pub fn white(intensity: f32) -> Self {
        Self::new(Color::WHITE, intensity)
    }

    /// Enable shadow casting
    pub fn with_shadows(mut self) -> Self {
        self.cast_shadows = true;
        self
    }

    /// Set the shadow map resolution
    pub fn shadow_map_size(mut self, size: u32) -> Self {
        self.shadow.map_size = size;
        self
    }

    /// Normalized direction light travels when emitted from `position`
    pub fn direction_from(&self, position: Vec3) -> Vec3 {
        let direction = (self.target - position).normalize();
        if direction == Vec3::ZERO {
            Vec3::new(0.0, -1.0, 0.0)
        } else {
            direction
        }
    }
}
