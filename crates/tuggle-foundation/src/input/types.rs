use tuggle_ui_graphics::Point;
use web_time::Instant;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// The device family an event came from. A normalizer listens to exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// Device-neutral pointer event in input-device coordinates.
///
/// Platform adapters convert mouse buttons and touch phases into this shape;
/// the normalizer only looks at kind, position and timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub source: PointerSource,
    pub kind: PointerEventKind,
    pub position: Point,
    pub timestamp: Instant,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, timestamp: Instant) -> Self {
        Self {
            id: 0,
            source: PointerSource::Mouse,
            kind,
            position,
            timestamp,
        }
    }

    pub fn mouse(kind: PointerEventKind, position: Point, timestamp: Instant) -> Self {
        Self::new(kind, position, timestamp)
    }

    pub fn touch(id: PointerId, kind: PointerEventKind, position: Point, timestamp: Instant) -> Self {
        Self {
            id,
            source: PointerSource::Touch,
            kind,
            position,
            timestamp,
        }
    }

    /// Copy of this event at another position, e.g. after a coordinate
    /// space conversion.
    pub fn with_position(&self, position: Point) -> Self {
        Self { position, ..*self }
    }
}
