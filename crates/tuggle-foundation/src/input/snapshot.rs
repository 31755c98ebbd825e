use tuggle_ui_graphics::Point;

/// Press state of the tracked pointer. Exactly one holds at any instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Down but still within the drag threshold.
    Pressed,
    Dragging,
}

/// Gesture state as seen by one frame.
///
/// Positions are in input-device coordinates. The one-shot flags and
/// `swipe_velocity` describe transitions observed since the previous
/// [`clear_interaction_flags`](super::GestureNormalizer::clear_interaction_flags).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GestureSnapshot {
    pub position: Point,
    pub previous_position: Point,
    pub start_position: Point,
    pub phase: GesturePhase,
    pub drag_started: bool,
    pub drag_ended: bool,
    pub tapped: bool,
    pub double_tapped: bool,
    pub tap_held: bool,
    pub swipe_detected: bool,
    pub swipe_velocity: Point,
    /// Live pointer velocity while down, zero otherwise.
    pub pointer_velocity: Point,
}

impl GestureSnapshot {
    pub fn is_pointer_down(&self) -> bool {
        self.phase != GesturePhase::Idle
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    /// Movement since the previous frame.
    pub fn delta(&self) -> Point {
        self.position - self.previous_position
    }

    /// Total movement since the press.
    pub fn drag_offset(&self) -> Point {
        self.position - self.start_position
    }

    pub fn has_one_shot_events(&self) -> bool {
        self.drag_started
            || self.drag_ended
            || self.tapped
            || self.double_tapped
            || self.tap_held
            || self.swipe_detected
    }

    pub(crate) fn clear_one_shots(&mut self) {
        self.drag_started = false;
        self.drag_ended = false;
        self.tapped = false;
        self.double_tapped = false;
        self.tap_held = false;
        self.swipe_detected = false;
        self.swipe_velocity = Point::ZERO;
    }
}
