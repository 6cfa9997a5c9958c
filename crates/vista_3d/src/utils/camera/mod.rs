//! Camera controllers for 3D navigation

mod input;
mod orbit;

pub use input::CameraInput;
pub use orbit::OrbitController;
