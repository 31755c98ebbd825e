//! Shared gesture constants for consistent touch/pointer handling.
//!
//! Distances are in input-device pixels (logical window pixels on desktop,
//! points on mobile). Times are wall-clock durations measured from pointer
//! timestamps.

use web_time::Duration;

/// A press that starts within this window after the end of a tap is a
/// double tap.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(400);

/// A press held at least this long without dragging is a tap-and-hold. A
/// press released before it can still be a tap.
pub const TAP_HOLD_THRESHOLD: Duration = Duration::from_millis(500);

/// Minimum total displacement for a release to count as a swipe.
pub const SWIPE_MIN_DISTANCE: f32 = 50.0;

/// Maximum press duration for a release to count as a swipe.
pub const SWIPE_MAX_TIME: Duration = Duration::from_millis(300);

/// Drag threshold in input pixels.
///
/// Moving further than this from the press position starts a drag and
/// rules out a tap on release.
pub const DRAG_THRESHOLD: f32 = 2.0;

/// Cap applied to the live pointer velocity, in input pixels per second.
pub const MAX_POINTER_VELOCITY: f32 = 8_000.0;
