//! Material system

mod shadow;
mod standard;

pub use shadow::ShadowMaterial;
pub use standard::StandardMaterial;

use vista_core::Color;

/// Material trait for all material types
pub trait Material: Send + Sync {
    /// Get the material type
    fn material_type(&self) -> MaterialType;

    /// Get base color
    fn base_color(&self) -> Color;

    /// Whether this material is transparent
    fn is_transparent(&self) -> bool {
        false
    }
}

/// Material types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialType {
    /// PBR standard material
    Standard,
    /// Transparent surface that only shows received shadows
    Shadow,
}

/// Which side of faces to render
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    /// Render front faces only
    #[default]
    Front,
    /// Render back faces only
    Back,
    /// Render both sides
    Double,
}

/// Material attached to a mesh
#[derive(Clone, Debug, PartialEq)]
pub enum MeshMaterial {
    Standard(StandardMaterial),
    Shadow(ShadowMaterial),
}

impl MeshMaterial {
    /// The standard material, if this is one
    pub fn as_standard(&self) -> Option<&StandardMaterial> {
        match self {
            MeshMaterial::Standard(material) => Some(material),
            MeshMaterial::Shadow(_) => None,
        }
    }

    /// Mutable access to the standard material, if this is one
    pub fn as_standard_mut(&mut self) -> Option<&mut StandardMaterial> {
        match self {
            MeshMaterial::Standard(material) => Some(material),
            MeshMaterial::Shadow(_) => None,
        }
    }

    fn inner(&self) -> &dyn Material {
        match self {
            MeshMaterial::Standard(material) => material,
            MeshMaterial::Shadow(material) => material,
        }
    }
}

impl Material for MeshMaterial {
    fn material_type(&self) -> MaterialType {
        self.inner().material_type()
    }

    fn base_color(&self) -> Color {
        self.inner().base_color()
    }

    fn is_transparent(&self) -> bool {
        self.inner().is_transparent()
    }
}

impl Default for MeshMaterial {
    fn default() -> Self {
        MeshMaterial::Standard(StandardMaterial::default())
    }
}

impl From<StandardMaterial> for MeshMaterial {
    fn from(material: StandardMaterial) -> Self {
        MeshMaterial::Standard(material)
    }
}

impl From<ShadowMaterial> for MeshMaterial {
    fn from(material: ShadowMaterial) -> Self {
        MeshMaterial::Shadow(material)
    }
}
