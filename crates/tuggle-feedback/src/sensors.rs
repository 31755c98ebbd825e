use std::cell::Cell;
use std::rc::Rc;

/// Gravity-relative acceleration in g, device axes (x right, y up, z out of
/// the screen). A device lying flat face up reads `(0, 0, -1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Acceleration {
    pub const FLAT: Acceleration = Acceleration {
        x: 0.0,
        y: 0.0,
        z: -1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Default for Acceleration {
    fn default() -> Self {
        Self::FLAT
    }
}

/// Polled motion sensor, read once per frame.
pub trait Accelerometer {
    fn acceleration(&self) -> Acceleration;
}

/// Settable tilt source shared between a producer (keyboard, test) and the
/// pages reading it.
#[derive(Clone, Debug, Default)]
pub struct SharedTilt {
    value: Rc<Cell<Acceleration>>,
}

impl SharedTilt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, acceleration: Acceleration) {
        self.value.set(acceleration);
    }

    /// Tilts by `(dx, dy)` g, keeping each planar axis within `[-1, 1]`.
    pub fn nudge(&self, dx: f32, dy: f32) {
        let current = self.value.get();
        let x = (current.x + dx).clamp(-1.0, 1.0);
        let y = (current.y + dy).clamp(-1.0, 1.0);
        let z = -(1.0 - (x * x + y * y).min(1.0)).sqrt();
        self.value.set(Acceleration::new(x, y, z));
    }

    pub fn level(&self) {
        self.value.set(Acceleration::FLAT);
    }
}

impl Accelerometer for SharedTilt {
    fn acceleration(&self) -> Acceleration {
        self.value.get()
    }
}
