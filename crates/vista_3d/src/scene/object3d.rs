//! Base 3D object transform

use vista_core::{Mat4, Quat, Vec3};

/// Local transform and render flags shared by every scene node
///
/// Mirrors the Three.js `Object3D` fields the viewer relies on: position,
/// rotation, scale, visibility and the two shadow flags.
#[derive(Clone, Debug, PartialEq)]
pub struct Object3D {
    /// Local position relative to parent
    pub position: Vec3,
    /// Local rotation as quaternion
    pub rotation: Quat,
    /// Local scale
    pub scale: Vec3,
    /// Visibility flag (hidden nodes hide their subtree)
    pub visible: bool,
    /// Whether this object casts shadows
    pub cast_shadows: bool,
    /// Whether this object receives shadows
    pub receive_shadows: bool,
}

impl Default for Object3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            visible: true,
            cast_shadows: false,
            receive_shadows: false,
        }
    }
}

impl Object3D {
    /// Create a new Object3D at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with position
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            ..Default::default()
        }
    }

    /// Set rotation from Euler angles (radians)
    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Quat::from_euler(x, y, z);
        self
    }

    /// Set shadow flags
    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadows = cast;
        self.receive_shadows = receive;
        self
    }

    /// Compute local transformation matrix
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_trs(self.position, self.rotation, self.scale)
    }
}
