//! Animation system for Tuggle
//!
//! Frame-driven tweens: callers advance animations with the frame delta
//! instead of registering frame callbacks.

mod animation;

pub use animation::*;
