//! Perspective camera

use vista_core::{Mat4, Size, Vec3};

/// Where the camera sits and what it looks at
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Eye position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// World up hint
    pub up: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 2.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
        }
    }
}

impl CameraPose {
    /// Unit vector from the eye toward the target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Orthonormal (right, up, forward) basis
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = self.forward();
        let mut right = forward.cross(self.up).normalize();
        if right == Vec3::ZERO {
            right = Vec3::X;
        }
        let up = right.cross(forward);
        (right, up, forward)
    }
}

/// Perspective camera for 3D rendering
///
/// Uses a frustum-based projection with field of view.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    /// Field of view in radians (vertical)
    pub fov: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75f32.to_radians(), 1.0, 0.1, 1000.0)
    }
}

impl PerspectiveCamera {
    /// Create a new perspective camera
    ///
    /// # Arguments
    /// * `fov` - Field of view in radians (vertical)
    /// * `aspect` - Aspect ratio (width / height)
    /// * `near` - Near clipping plane
    /// * `far` - Far clipping plane
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect,
            near,
            far,
        }
    }

    /// Set aspect ratio
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.set_aspect(aspect);
        self
    }

    /// Update the aspect ratio; non-positive or non-finite values are ignored
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Match the aspect ratio of an allocated viewport
    ///
    /// A degenerate viewport keeps the previous aspect.
    pub fn fit_viewport(&mut self, viewport: Size) {
        if let Some(aspect) = viewport.aspect_ratio() {
            self.aspect = aspect;
        }
    }

    /// Compute projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Compute view matrix from a pose
    pub fn view_matrix(&self, pose: &CameraPose) -> Mat4 {
        Mat4::look_at_rh(pose.position, pose.target, pose.up)
    }

    /// World-space direction through a point in normalized device coordinates
    pub fn ray_direction(&self, ndc_x: f32, ndc_y: f32, pose: &CameraPose) -> Vec3 {
        let (right, up, forward) = pose.basis();
        let half_height = (self.fov * 0.5).tan();
        let half_width = half_height * self.aspect;
        (forward + right * (ndc_x * half_width) + up * (ndc_y * half_height)).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_viewport_keeps_aspect() {
        let mut camera = PerspectiveCamera::default();
        camera.fit_viewport(Size::new(800.0, 400.0));
        assert_eq!(camera.aspect, 2.0);

        camera.fit_viewport(Size::new(800.0, 0.0));
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_center_ray_looks_forward() {
        let camera = PerspectiveCamera::default();
        let pose = CameraPose::default();
        let dir = camera.ray_direction(0.0, 0.0, &pose);
        assert!(dir.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
    }

    #[test]
    fn test_edge_ray_matches_fov() {
        let camera = PerspectiveCamera::new(90f32.to_radians(), 1.0, 0.1, 100.0);
        let pose = CameraPose::default();
        let dir = camera.ray_direction(0.0, 1.0, &pose);
        let expected = Vec3::new(0.0, 1.0, -1.0).normalize();
        assert!(dir.abs_diff_eq(expected, 1e-5));
    }
}
