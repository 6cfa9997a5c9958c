//! Standard PBR material

use super::{Material, MaterialType, Side};
use vista_core::Color;

/// Standard PBR material (like Three.js MeshStandardMaterial)
///
/// Uses metallic-roughness workflow for physically-based rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardMaterial {
    /// Base color (albedo)
    pub color: Color,
    /// Metalness factor (0.0 = dielectric, 1.0 = metal)
    pub metalness: f32,
    /// Roughness factor (0.0 = smooth/mirror, 1.0 = rough)
    pub roughness: f32,
    /// Opacity
    pub opacity: f32,
    /// Transparent
    pub transparent: bool,
    /// Which side to render
    pub side: Side,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            metalness: 0.0,
            roughness: 0.5,
            opacity: 1.0,
            transparent: false,
            side: Side::Front,
        }
    }
}

impl StandardMaterial {
    /// Create a new standard material
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with color
    pub fn with_color(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Set color
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set metalness
    pub fn metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    /// Set roughness
    pub fn roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Set opacity
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.transparent = self.opacity < 1.0;
        self
    }

    /// Set side
    pub fn side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}

impl Material for StandardMaterial {
    fn material_type(&self) -> MaterialType {
        MaterialType::Standard
    }

    fn base_color(&self) -> Color {
        self.color
    }

    fn is_transparent(&self) -> bool {
        self.transparent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_clamps() {
        let material = StandardMaterial::new().roughness(1.5).metalness(-0.2);
        assert_eq!(material.roughness, 1.0);
        assert_eq!(material.metalness, 0.0);
        assert!(!material.is_transparent());
        assert!(material.opacity(0.5).is_transparent());
    }
}
