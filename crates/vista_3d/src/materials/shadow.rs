//! Shadow catcher material

use super::{Material, MaterialType};
use vista_core::Color;

/// Transparent material that only darkens where shadows land
/// (like Three.js ShadowMaterial)
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowMaterial {
    /// Shadow tint
    pub color: Color,
    /// Shadow opacity
    pub opacity: f32,
}

impl Default for ShadowMaterial {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            opacity: 1.0,
        }
    }
}

impl ShadowMaterial {
    /// Create with the given shadow opacity
    pub fn new(opacity: f32) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            ..Default::default()
        }
    }
}

impl Material for ShadowMaterial {
    fn material_type(&self) -> MaterialType {
        MaterialType::Shadow
    }

    fn base_color(&self) -> Color {
        self.color.with_alpha(self.opacity)
    }

    fn is_transparent(&self) -> bool {
        true
    }
}
