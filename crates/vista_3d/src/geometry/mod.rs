//! Geometry primitives

mod primitives;
mod vertex;

pub use primitives::{BoxGeometry, PlaneGeometry};
pub use vertex::{Geometry, Vertex};
