//! Foundation layer for Tuggle input.
//!
//! Raw mouse and touch events are adapted to [`PointerEvent`] at the platform
//! boundary and fed to a single [`GestureNormalizer`], which exposes one
//! per-frame [`GestureSnapshot`] vocabulary (drag, tap, double tap, hold,
//! swipe) to the carousel and its pages.

pub mod clock;
pub mod gesture_constants;
pub mod input;
pub mod velocity_tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use input::{
    GestureConfig, GestureNormalizer, GesturePhase, GestureSnapshot, PointerEvent,
    PointerEventKind, PointerId, PointerSource,
};
pub use velocity_tracker::{PointerVelocityTracker, VelocityTracker1D};

pub use web_time::{Duration, Instant};

pub mod prelude {
    pub use crate::clock::Clock;
    pub use crate::input::{GestureNormalizer, GestureSnapshot, PointerEvent, PointerEventKind};
    pub use tuggle_ui_graphics::Point;
}
