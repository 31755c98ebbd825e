//! Retained scene graph.
//!
//! Coordinates are scene units with y pointing up. A node's `anchor` is a
//! fraction of its content bounds and marks the point placed at `position`
//! in the parent's space; rotation and scale pivot around it.

mod node;
mod polygon;
mod transform;

pub use node::{NodeId, SceneNode, Shape};
pub use polygon::Polygon;
pub use transform::Affine;
