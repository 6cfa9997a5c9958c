//! Viewer configuration
//!
//! Every field has a default matching the stock viewer, so an empty file is a
//! valid config. Colors are `0xRRGGBB` integers.
//!
//! ```toml
//! [renderer]
//! clear_color = 0xffffff
//!
//! [camera]
//! fov_degrees = 60.0
//!
//! [demo_cube]
//! enabled = false
//! ```

use crate::error::{Result, ViewerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use vista_3d::swap::ModelStyle;
use vista_3d::utils::camera::OrbitController;
use vista_3d::{PerspectiveCamera, RenderConfig, StandardMaterial};
use vista_core::{Color, Vec3};

/// Complete viewer configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub renderer: RendererConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub ground: GroundConfig,
    pub light: LightConfig,
    pub model: ModelConfig,
    pub demo_cube: DemoCubeConfig,
}

/// Frame output settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RendererConfig {
    pub clear_color: u32,
    pub shadows: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: 0xffffff,
            shadows: true,
        }
    }
}

/// Perspective camera settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Starting distance from the origin along +Z
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 2.0,
        }
    }
}

/// Orbit control settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Fraction of remaining motion applied per 60 Hz frame
    pub damping: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    /// Radians per pixel
    pub rotate_speed: f32,
    /// Fraction of distance per scroll unit
    pub zoom_speed: f32,
    /// Fraction of distance per pixel
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            damping: 0.25,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            pan_speed: 0.002,
            min_distance: 0.1,
            max_distance: 500.0,
        }
    }
}

/// Shadow-catching ground plane
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GroundConfig {
    pub enabled: bool,
    /// Edge length of the square plane
    pub size: f32,
    /// Plane height
    pub height: f32,
    pub shadow_opacity: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 500.0,
            height: -1.0,
            shadow_opacity: 0.5,
        }
    }
}

/// Directional light
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LightConfig {
    pub color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
    pub cast_shadows: bool,
    pub shadow_map_size: u32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            intensity: 1.0,
            position: [5.0, 5.0, 5.0],
            cast_shadows: true,
            shadow_map_size: 1024,
        }
    }
}

/// Look applied to loaded models
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    pub color: u32,
    pub roughness: f32,
    pub metalness: f32,
    /// Root height, placing models on the ground plane
    pub vertical_offset: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            roughness: 0.1,
            metalness: 0.2,
            vertical_offset: -1.0,
        }
    }
}

/// Clickable cube shown at the origin
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoCubeConfig {
    pub enabled: bool,
    pub color: u32,
    pub size: f32,
    /// Give the cube a random color when clicked
    pub recolor_on_click: bool,
}

impl Default for DemoCubeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: 0x00ff00,
            size: 1.0,
            recolor_on_click: true,
        }
    }
}

impl ViewerConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ViewerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ViewerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the viewer cannot work with
    pub fn validate(&self) -> Result<()> {
        fn check(ok: bool, message: &str) -> Result<()> {
            if ok {
                Ok(())
            } else {
                Err(ViewerError::InvalidConfig(message.to_string()))
            }
        }

        let camera = &self.camera;
        check(
            camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0,
            "camera.fov_degrees must be between 0 and 180",
        )?;
        check(camera.near > 0.0, "camera.near must be positive")?;
        check(camera.far > camera.near, "camera.far must exceed camera.near")?;
        check(camera.distance > 0.0, "camera.distance must be positive")?;

        let controls = &self.controls;
        check(
            controls.damping > 0.0 && controls.damping <= 1.0,
            "controls.damping must be in (0, 1]",
        )?;
        for (speed, name) in [
            (controls.rotate_speed, "controls.rotate_speed"),
            (controls.zoom_speed, "controls.zoom_speed"),
            (controls.pan_speed, "controls.pan_speed"),
        ] {
            if !(speed.is_finite() && speed >= 0.0) {
                return Err(ViewerError::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number"
                )));
            }
        }
        check(
            controls.min_distance > 0.0 && controls.max_distance >= controls.min_distance,
            "controls.min_distance must be positive and not above controls.max_distance",
        )?;

        check(self.ground.size > 0.0, "ground.size must be positive")?;
        check(
            (0.0..=1.0).contains(&self.ground.shadow_opacity),
            "ground.shadow_opacity must be in [0, 1]",
        )?;

        check(
            self.light.shadow_map_size.is_power_of_two(),
            "light.shadow_map_size must be a power of two",
        )?;
        check(self.light.intensity >= 0.0, "light.intensity must not be negative")?;

        check(
            (0.0..=1.0).contains(&self.model.roughness),
            "model.roughness must be in [0, 1]",
        )?;
        check(
            (0.0..=1.0).contains(&self.model.metalness),
            "model.metalness must be in [0, 1]",
        )?;

        check(self.demo_cube.size > 0.0, "demo_cube.size must be positive")?;
        Ok(())
    }

    /// Frame output settings
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            clear_color: Color::from_hex(self.renderer.clear_color),
            shadows_enabled: self.renderer.shadows,
        }
    }

    /// Camera with a square aspect until the first resize
    pub fn perspective_camera(&self) -> PerspectiveCamera {
        PerspectiveCamera::new(
            self.camera.fov_degrees.to_radians(),
            1.0,
            self.camera.near,
            self.camera.far,
        )
    }

    /// Orbit controls around the origin
    pub fn orbit_controller(&self) -> OrbitController {
        let controls = &self.controls;
        let mut orbit = OrbitController::new(Vec3::ZERO, self.camera.distance);
        orbit.damping = controls.damping;
        orbit.rotate_enabled = controls.enable_rotate;
        orbit.zoom_enabled = controls.enable_zoom;
        orbit.pan_enabled = controls.enable_pan;
        orbit.rotation_speed = controls.rotate_speed;
        orbit.zoom_speed = controls.zoom_speed;
        orbit.pan_speed = controls.pan_speed;
        orbit.min_distance = controls.min_distance;
        orbit.max_distance = controls.max_distance;
        orbit
    }

    /// Look applied to loaded models
    pub fn model_style(&self) -> ModelStyle {
        ModelStyle {
            material: StandardMaterial::with_color(Color::from_hex(self.model.color))
                .roughness(self.model.roughness)
                .metalness(self.model.metalness),
            vertical_offset: self.model.vertical_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ViewerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = ViewerConfig::from_toml_str(
            r#"
            [camera]
            fov_degrees = 60.0

            [demo_cube]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.near, 0.1);
        assert!(!config.demo_cube.enabled);
        assert_eq!(config.demo_cube.color, 0x00ff00);
        assert_eq!(config.light, LightConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ViewerConfig::default();
        config.ground.shadow_opacity = 0.25;
        config.light.position = [1.0, 2.0, 3.0];

        let text = config.to_toml().unwrap();
        assert_eq!(ViewerConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ViewerConfig::from_toml_str("[camera]\nnear = 10.0\nfar = 5.0\n").unwrap_err();
        assert!(matches!(err, ViewerError::InvalidConfig(msg) if msg.contains("camera.far")));

        let err = ViewerConfig::from_toml_str("[light]\nshadow_map_size = 1000\n").unwrap_err();
        assert!(matches!(err, ViewerError::InvalidConfig(_)));

        let err = ViewerConfig::from_toml_str("[camera]\nfov_degrees = \"wide\"\n").unwrap_err();
        assert!(matches!(err, ViewerError::ConfigParse(_)));
    }

    #[test]
    fn test_control_speeds_must_be_finite_and_non_negative() {
        let err = ViewerConfig::from_toml_str("[controls]\nrotate_speed = nan\n").unwrap_err();
        assert!(matches!(err, ViewerError::InvalidConfig(msg) if msg.contains("controls.rotate_speed")));

        let err = ViewerConfig::from_toml_str("[controls]\nzoom_speed = -0.1\n").unwrap_err();
        assert!(matches!(err, ViewerError::InvalidConfig(msg) if msg.contains("controls.zoom_speed")));

        let err = ViewerConfig::from_toml_str("[controls]\npan_speed = inf\n").unwrap_err();
        assert!(matches!(err, ViewerError::InvalidConfig(msg) if msg.contains("controls.pan_speed")));

        // Zero disables that motion
        let config = ViewerConfig::from_toml_str("[controls]\npan_speed = 0.0\n").unwrap();
        assert_eq!(config.controls.pan_speed, 0.0);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ViewerConfig::load("/definitely/not/here/vista.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here/vista.toml"));
    }

    #[test]
    fn test_model_style_from_config() {
        let style = ViewerConfig::default().model_style();
        assert_eq!(style, ModelStyle::default());
    }
}
