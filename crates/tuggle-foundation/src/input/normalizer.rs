//! The pointer/gesture normalizer.
//!
//! Device callbacks only enqueue [`PointerEvent`]s. Each frame the app shell
//! calls [`GestureNormalizer::update`] before any consumer runs, which
//! applies the queued transitions and runs hold detection, and
//! [`GestureNormalizer::clear_interaction_flags`] after every consumer has
//! read the frame's one-shot flags.

use std::collections::VecDeque;
use std::rc::Rc;

use tuggle_ui_graphics::Point;
use web_time::{Duration, Instant};

use super::snapshot::{GesturePhase, GestureSnapshot};
use super::types::{PointerEvent, PointerEventKind, PointerId, PointerSource};
use crate::clock::Clock;
use crate::gesture_constants::{
    DOUBLE_TAP_WINDOW, DRAG_THRESHOLD, MAX_POINTER_VELOCITY, SWIPE_MAX_TIME, SWIPE_MIN_DISTANCE,
    TAP_HOLD_THRESHOLD,
};
use crate::velocity_tracker::PointerVelocityTracker;

/// Timing and distance thresholds for gesture classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    pub double_tap_window: Duration,
    pub hold_threshold: Duration,
    pub swipe_min_distance: f32,
    pub swipe_max_time: Duration,
    pub drag_threshold: f32,
    pub max_pointer_velocity: f32,
    /// The only device family whose events are accepted.
    pub source: PointerSource,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_window: DOUBLE_TAP_WINDOW,
            hold_threshold: TAP_HOLD_THRESHOLD,
            swipe_min_distance: SWIPE_MIN_DISTANCE,
            swipe_max_time: SWIPE_MAX_TIME,
            drag_threshold: DRAG_THRESHOLD,
            max_pointer_velocity: MAX_POINTER_VELOCITY,
            source: PointerSource::Mouse,
        }
    }
}

impl GestureConfig {
    pub fn with_source(mut self, source: PointerSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    pub fn with_double_tap_window(mut self, window: Duration) -> Self {
        self.double_tap_window = window;
        self
    }

    pub fn with_hold_threshold(mut self, threshold: Duration) -> Self {
        self.hold_threshold = threshold;
        self
    }
}

/// Converts one device family's pointer events into a polled gesture state.
pub struct GestureNormalizer {
    config: GestureConfig,
    clock: Rc<dyn Clock>,
    active: bool,
    pending: VecDeque<PointerEvent>,
    /// Events the last update applied, in order.
    accepted: Vec<PointerEvent>,
    state: GestureSnapshot,
    tracked_pointer: Option<PointerId>,
    press_started_at: Option<Instant>,
    last_tap_at: Option<Instant>,
    moving: bool,
    hold_reported: bool,
    velocity: PointerVelocityTracker,
}

impl GestureNormalizer {
    pub fn new(config: GestureConfig, clock: Rc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            active: false,
            pending: VecDeque::new(),
            accepted: Vec::new(),
            state: GestureSnapshot::default(),
            tracked_pointer: None,
            press_started_at: None,
            last_tap_at: None,
            moving: false,
            hold_reported: false,
            velocity: PointerVelocityTracker::new(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Begins accepting pointer events. Returns `false` if already started.
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        log::info!("gesture normalizer listening for {:?} input", self.config.source);
        true
    }

    /// Stops accepting pointer events and resets all state. No-op when
    /// already stopped.
    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.clear();
        log::info!("gesture normalizer stopped");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Device callback entry point. Events are buffered until the next
    /// [`update`](Self::update).
    pub fn on_pointer_event(&mut self, event: PointerEvent) {
        if !self.active || event.source != self.config.source {
            return;
        }
        self.pending.push_back(event);
    }

    /// Applies buffered input and derives this frame's state.
    pub fn update(&mut self, _dt: f32) -> GestureSnapshot {
        if !self.active {
            return self.state;
        }

        if self.state.phase != GesturePhase::Dragging || !self.moving {
            self.state.previous_position = self.state.position;
        }

        self.accepted.clear();
        while let Some(event) = self.pending.pop_front() {
            if self.apply(event) {
                self.accepted.push(event);
            }
        }

        if self.state.phase == GesturePhase::Pressed && !self.hold_reported {
            if let Some(pressed_at) = self.press_started_at {
                let held = self.clock.now().saturating_duration_since(pressed_at);
                if held >= self.config.hold_threshold {
                    self.hold_reported = true;
                    self.state.tap_held = true;
                    log::trace!("tap-and-hold at {:?}", self.state.position);
                }
            }
        }

        self.state.pointer_velocity = if self.state.is_pointer_down() {
            self.velocity.velocity(self.config.max_pointer_velocity)
        } else {
            Point::ZERO
        };

        self.state
    }

    /// Resets the one-shot flags and swipe velocity. Call once per frame
    /// after every consumer has read them.
    pub fn clear_interaction_flags(&mut self) {
        self.state.clear_one_shots();
        self.moving = false;
    }

    /// Ends the gesture of whichever pointer is down, including one whose
    /// press is still queued. Returns `false` when no pointer is down.
    pub fn cancel(&mut self) -> bool {
        if !self.active {
            return false;
        }
        let tracked = self.tracked_pointer.map(|id| (id, self.state.position));
        let tracked = self.pending.iter().fold(tracked, |tracked, event| {
            match (event.kind, tracked) {
                (PointerEventKind::Down, None) => Some((event.id, event.position)),
                (PointerEventKind::Move, Some((id, _))) if id == event.id => {
                    Some((id, event.position))
                }
                (PointerEventKind::Up | PointerEventKind::Cancel, Some((id, _)))
                    if id == event.id =>
                {
                    None
                }
                _ => tracked,
            }
        });
        let Some((id, position)) = tracked else {
            return false;
        };
        self.pending.push_back(PointerEvent {
            id,
            source: self.config.source,
            kind: PointerEventKind::Cancel,
            position,
            timestamp: self.clock.now(),
        });
        log::debug!("cancelling gesture of pointer {id}");
        true
    }

    /// Full reset: drops buffered events and returns to idle.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.accepted.clear();
        self.state = GestureSnapshot::default();
        self.tracked_pointer = None;
        self.press_started_at = None;
        self.last_tap_at = None;
        self.moving = false;
        self.hold_reported = false;
        self.velocity.reset();
    }

    /// The pointer whose gesture is being tracked, if any.
    pub fn tracked_pointer(&self) -> Option<PointerId> {
        self.tracked_pointer
    }

    /// Events the most recent [`update`](Self::update) applied. Presses from
    /// a second pointer and that pointer's moves and releases are left out.
    /// Moves while no pointer is down are kept as hovers.
    pub fn accepted_events(&self) -> &[PointerEvent] {
        &self.accepted
    }

    pub fn snapshot(&self) -> &GestureSnapshot {
        &self.state
    }

    pub fn position(&self) -> Point {
        self.state.position
    }

    pub fn is_pointer_down(&self) -> bool {
        self.state.is_pointer_down()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    fn apply(&mut self, event: PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                if self.tracked_pointer.is_some() {
                    return false;
                }
                self.tracked_pointer = Some(event.id);
                self.pointer_pressed(event.position, event.timestamp);
                true
            }
            PointerEventKind::Move => match self.tracked_pointer {
                Some(id) if id == event.id => {
                    self.pointer_moved(event.position, event.timestamp);
                    true
                }
                Some(_) => false,
                None => true,
            },
            PointerEventKind::Up | PointerEventKind::Cancel => {
                if self.tracked_pointer != Some(event.id) {
                    return false;
                }
                self.tracked_pointer = None;
                let cancelled = event.kind == PointerEventKind::Cancel;
                self.pointer_released(event.position, event.timestamp, cancelled);
                true
            }
        }
    }

    fn pointer_pressed(&mut self, position: Point, at: Instant) {
        if let Some(last_tap) = self.last_tap_at {
            if at.saturating_duration_since(last_tap) <= self.config.double_tap_window {
                self.state.double_tapped = true;
                log::trace!("double tap at {position:?}");
            }
        }

        self.state.phase = GesturePhase::Pressed;
        self.state.start_position = position;
        self.state.previous_position = self.state.position;
        self.state.position = position;
        self.press_started_at = Some(at);
        self.hold_reported = false;

        self.velocity.reset();
        self.velocity.add(at, position);
    }

    fn pointer_moved(&mut self, position: Point, at: Instant) {
        self.state.previous_position = self.state.position;
        self.state.position = position;
        self.moving = true;
        self.velocity.add(at, position);

        if self.state.phase == GesturePhase::Pressed
            && position.distance(self.state.start_position) > self.config.drag_threshold
        {
            self.state.phase = GesturePhase::Dragging;
            self.state.drag_started = true;
            log::trace!("drag started from {:?}", self.state.start_position);
        }
    }

    fn pointer_released(&mut self, position: Point, at: Instant, cancelled: bool) {
        let was_dragging = self.state.phase == GesturePhase::Dragging;
        let elapsed = self
            .press_started_at
            .map(|pressed_at| at.saturating_duration_since(pressed_at))
            .unwrap_or_default();
        let displacement = position - self.state.start_position;
        let distance = displacement.length();

        self.state.phase = GesturePhase::Idle;
        self.state.position = position;
        self.state.previous_position = position;
        self.press_started_at = None;
        self.velocity.reset();

        if !cancelled {
            if !was_dragging
                && !self.hold_reported
                && distance < self.config.drag_threshold
                && elapsed < self.config.hold_threshold
            {
                self.state.tapped = true;
                self.last_tap_at = Some(at);
            }

            if distance >= self.config.swipe_min_distance && elapsed <= self.config.swipe_max_time
            {
                self.state.swipe_detected = true;
                let secs = elapsed.as_secs_f32();
                if secs > 0.0 {
                    self.state.swipe_velocity = displacement / secs;
                }
                log::trace!("swipe {:?} px/s", self.state.swipe_velocity);
            }
        }

        if was_dragging {
            self.state.drag_ended = true;
        }
    }
}

impl std::fmt::Debug for GestureNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureNormalizer")
            .field("active", &self.active)
            .field("pending", &self.pending.len())
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/normalizer_tests.rs"]
mod tests;
