//! Orbit camera controller
//!
//! Orbits around a target point, like Three.js OrbitControls.

use super::CameraInput;
use crate::scene::CameraPose;
use std::f32::consts::PI;
use vista_core::Vec3;

/// Orbit camera controller
///
/// Primary drag rotates, secondary drag pans and the scroll wheel zooms.
/// Motion is damped: each 60 Hz frame covers `damping` of the remaining
/// distance to the goal state.
///
/// # Example
///
/// ```
/// use vista_3d::utils::camera::{CameraInput, OrbitController};
/// use vista_core::Vec3;
///
/// let mut orbit = OrbitController::new(Vec3::ZERO, 2.0);
/// let pose = orbit.update(1.0 / 60.0, &CameraInput::new());
/// assert!(pose.position.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-6));
/// ```
#[derive(Clone, Debug)]
pub struct OrbitController {
    /// Target point to orbit around
    pub target: Vec3,
    /// Distance from target
    pub distance: f32,
    /// Horizontal angle (radians, 0 = on the +Z axis)
    pub azimuth: f32,
    /// Vertical angle (radians, 0 = horizontal, positive = above target)
    pub elevation: f32,

    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
    /// Minimum elevation angle (radians)
    pub min_elevation: f32,
    /// Maximum elevation angle (radians)
    pub max_elevation: f32,

    /// Rotation sensitivity (radians per pixel)
    pub rotation_speed: f32,
    /// Zoom sensitivity (fraction of distance per scroll unit)
    pub zoom_speed: f32,
    /// Pan sensitivity (fraction of distance per pixel)
    pub pan_speed: f32,

    /// Fraction of remaining motion applied per 60 Hz frame (1 = no smoothing)
    pub damping: f32,

    /// Enable rotation
    pub rotate_enabled: bool,
    /// Enable zooming
    pub zoom_enabled: bool,
    /// Enable panning
    pub pan_enabled: bool,

    enabled: bool,
    initial: (Vec3, f32),

    // Goal state the damped values move toward
    goal_azimuth: f32,
    goal_elevation: f32,
    goal_distance: f32,
    goal_target: Vec3,
}

impl OrbitController {
    /// Create a new orbit controller looking at `target` from +Z
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            distance,
            azimuth: 0.0,
            elevation: 0.0,

            min_distance: 0.1,
            max_distance: 1000.0,
            min_elevation: -PI * 0.45,
            max_elevation: PI * 0.45,

            rotation_speed: 0.005,
            zoom_speed: 0.1,
            pan_speed: 0.002,

            damping: 0.25,

            rotate_enabled: true,
            zoom_enabled: true,
            pan_enabled: true,

            enabled: true,
            initial: (target, distance),

            goal_azimuth: 0.0,
            goal_elevation: 0.0,
            goal_distance: distance,
            goal_target: target,
        }
    }

    /// Set distance instantly
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self.goal_distance = self.distance;
    }

    /// Set angles instantly (in radians)
    pub fn set_angles(&mut self, azimuth: f32, elevation: f32) {
        self.azimuth = azimuth;
        self.elevation = elevation.clamp(self.min_elevation, self.max_elevation);
        self.goal_azimuth = self.azimuth;
        self.goal_elevation = self.elevation;
    }

    /// Enable or disable the controller
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if controller is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return to the initial pose instantly
    pub fn reset(&mut self) {
        let (target, distance) = self.initial;
        self.target = target;
        self.goal_target = target;
        self.set_distance(distance);
        self.set_angles(0.0, 0.0);
    }

    /// Current pose without advancing
    pub fn pose(&self) -> CameraPose {
        let cos_elev = self.elevation.cos();
        CameraPose {
            position: Vec3::new(
                self.target.x + self.distance * cos_elev * self.azimuth.sin(),
                self.target.y + self.distance * self.elevation.sin(),
                self.target.z + self.distance * cos_elev * self.azimuth.cos(),
            ),
            target: self.target,
            up: Vec3::UP,
        }
    }

    /// Apply input, advance damping by `dt` seconds and return the new pose
    pub fn update(&mut self, dt: f32, input: &CameraInput) -> CameraPose {
        if !self.enabled {
            return self.pose();
        }

        if self.rotate_enabled && input.primary_pressed {
            self.goal_azimuth -= input.pointer_delta.x * self.rotation_speed;
            self.goal_elevation += input.pointer_delta.y * self.rotation_speed;
            self.goal_elevation = self
                .goal_elevation
                .clamp(self.min_elevation, self.max_elevation);
        }

        if self.pan_enabled && input.secondary_pressed {
            let (right, up, _) = self.pose().basis();
            let scale = self.pan_speed * self.distance;
            self.goal_target -= right * (input.pointer_delta.x * scale);
            self.goal_target += up * (input.pointer_delta.y * scale);
        }

        if self.zoom_enabled && input.scroll_delta != 0.0 {
            self.goal_distance -= input.scroll_delta * self.zoom_speed * self.goal_distance;
            self.goal_distance = self
                .goal_distance
                .clamp(self.min_distance, self.max_distance);
        }

        let t = 1.0 - (1.0 - self.damping.clamp(0.0, 1.0)).powf(dt.max(0.0) * 60.0);
        self.azimuth = lerp(self.azimuth, self.goal_azimuth, t);
        self.elevation = lerp(self.elevation, self.goal_elevation, t);
        self.distance = lerp(self.distance, self.goal_distance, t);
        self.target = self.target.lerp(self.goal_target, t);

        self.pose()
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 2.0)
    }
}
