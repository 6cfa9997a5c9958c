//! 3D math helpers built on the core vector types

mod bounds;
mod ray;

pub use bounds::BoundingBox;
pub use ray::Ray;
