//! Vista Viewer Widget
//!
//! Embeddable 3D model viewer driven by a host lifecycle: create, update
//! view parameters, tick once per frame, destroy.
//!
//! # Example
//!
//! ```ignore
//! use vista_widget::prelude::*;
//!
//! let runtime = tokio::runtime::Runtime::new()?;
//! let mut viewer = ViewerWidget::new(ViewerConfig::default(), runtime.handle().clone())?;
//!
//! viewer.update_view(&ViewParams::new(800.0, 600.0).with_model("https://example.com/teapot.obj"));
//!
//! // every frame
//! if let Some(frame) = viewer.tick(1.0 / 60.0) {
//!     renderer.submit(&frame);
//! }
//!
//! viewer.destroy();
//! ```

pub mod config;
mod error;
mod stage;
mod widget;

pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use stage::{build_stage, Stage};
pub use widget::{ModelStatus, PointerButton, ViewParams, ViewerWidget};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::config::ViewerConfig;
    pub use crate::error::{Result, ViewerError};
    pub use crate::widget::{ModelStatus, PointerButton, ViewParams, ViewerWidget};

    pub use vista_3d::{Frame, Hit, SwapOutcome};
    pub use vista_core::{Color, Size, Vec2, Vec3};
}
