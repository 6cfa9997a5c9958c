//! Vista Core
//!
//! Foundational value types shared by the Vista viewer crates:
//!
//! - **Math**: `Vec2`, `Vec3`, `Mat4` (column-major) and `Quat`
//! - **Viewport**: `Size` of the rectangle allocated by the host
//! - **Color**: linear RGBA color with hex conversion
//!
//! # Example
//!
//! ```rust
//! use vista_core::{Color, Mat4, Vec3};
//!
//! let m = Mat4::translation(0.0, -1.0, 0.0);
//! let p = m.transform_point(Vec3::new(1.0, 1.0, 1.0));
//! assert_eq!(p, Vec3::new(1.0, 0.0, 1.0));
//!
//! assert_eq!(Color::from_hex(0x00ff00).to_hex(), 0x00ff00);
//! ```

pub mod color;
pub mod math;

pub use color::Color;
pub use math::{Mat4, Quat, Size, Vec2, Vec3};
