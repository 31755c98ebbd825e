//! Pointer input: event types, the per-frame gesture snapshot and the
//! normalizer that produces it.

mod normalizer;
mod snapshot;
mod types;

pub use normalizer::{GestureConfig, GestureNormalizer};
pub use snapshot::{GesturePhase, GestureSnapshot};
pub use types::{PointerEvent, PointerEventKind, PointerId, PointerSource};
