//! Camera input handling

use vista_core::Vec2;

/// Input state for camera controllers, accumulated between updates
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CameraInput {
    /// Pointer movement since the last update, in pixels
    pub pointer_delta: Vec2,
    /// Scroll wheel delta (positive = zoom in)
    pub scroll_delta: f32,
    /// Whether primary button is held (rotate)
    pub primary_pressed: bool,
    /// Whether secondary button is held (pan)
    pub secondary_pressed: bool,
}

impl CameraInput {
    /// Create empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget per-frame deltas while keeping button state
    pub fn clear_deltas(&mut self) {
        self.pointer_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }
}
