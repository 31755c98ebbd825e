//! Pure math/data for drawing in Tuggle
//!
//! This crate contains the geometry primitives and color definitions
//! shared by the input, scene and render layers.

mod color;
mod geometry;

pub use color::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{Point, Rect, Size};
}
