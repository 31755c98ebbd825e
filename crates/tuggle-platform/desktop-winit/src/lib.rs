//! Adapts winit window events to Tuggle pointer events.
//!
//! Physical positions are divided by the window scale factor so the shell
//! always sees logical units. The keyboard drives a [`SharedTilt`] standing
//! in for the accelerometer desktops lack.

use tuggle_feedback::SharedTilt;
use tuggle_foundation::{Instant, PointerEvent, PointerEventKind, PointerId};
use tuggle_ui_graphics::Point;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, Touch, TouchPhase};
use winit::keyboard::KeyCode;

/// Tilt added per arrow key press, in g.
pub const TILT_STEP: f32 = 0.15;

pub struct DesktopWinitPlatform {
    scale_factor: f64,
    cursor: Point,
    mouse_down: bool,
    tilt: SharedTilt,
}

impl DesktopWinitPlatform {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            cursor: Point::ZERO,
            mouse_down: false,
            tilt: SharedTilt::new(),
        }
    }

    pub fn set_scale_factor(&mut self, factor: f64) {
        self.scale_factor = factor;
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Handle to the keyboard-driven tilt, for the feedback bundle.
    pub fn tilt(&self) -> SharedTilt {
        self.tilt.clone()
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn pointer_position(&self, position: PhysicalPosition<f64>) -> Point {
        Point {
            x: (position.x / self.scale_factor) as f32,
            y: (position.y / self.scale_factor) as f32,
        }
    }

    /// Tracks the cursor; produces a move only while the left button is held.
    pub fn cursor_moved(
        &mut self,
        position: PhysicalPosition<f64>,
        at: Instant,
    ) -> Option<PointerEvent> {
        self.cursor = self.pointer_position(position);
        self.mouse_down
            .then(|| PointerEvent::mouse(PointerEventKind::Move, self.cursor, at))
    }

    pub fn mouse_input(
        &mut self,
        state: ElementState,
        button: MouseButton,
        at: Instant,
    ) -> Option<PointerEvent> {
        if button != MouseButton::Left {
            return None;
        }
        let kind = match (state, self.mouse_down) {
            (ElementState::Pressed, false) => PointerEventKind::Down,
            (ElementState::Released, true) => PointerEventKind::Up,
            _ => return None,
        };
        self.mouse_down = state == ElementState::Pressed;
        Some(PointerEvent::mouse(kind, self.cursor, at))
    }

    /// A held button whose release the window will never see.
    pub fn cursor_left(&mut self, at: Instant) -> Option<PointerEvent> {
        if !self.mouse_down {
            return None;
        }
        self.mouse_down = false;
        Some(PointerEvent::mouse(PointerEventKind::Cancel, self.cursor, at))
    }

    pub fn touch(&self, touch: &Touch, at: Instant) -> PointerEvent {
        self.touch_event(touch.id, touch.phase, touch.location, at)
    }

    pub fn touch_event(
        &self,
        id: PointerId,
        phase: TouchPhase,
        location: PhysicalPosition<f64>,
        at: Instant,
    ) -> PointerEvent {
        let kind = match phase {
            TouchPhase::Started => PointerEventKind::Down,
            TouchPhase::Moved => PointerEventKind::Move,
            TouchPhase::Ended => PointerEventKind::Up,
            TouchPhase::Cancelled => PointerEventKind::Cancel,
        };
        PointerEvent::touch(id, kind, self.pointer_position(location), at)
    }

    /// Arrow keys tilt, space levels. Returns whether the key was used.
    pub fn key_pressed(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::ArrowLeft => self.tilt.nudge(-TILT_STEP, 0.0),
            KeyCode::ArrowRight => self.tilt.nudge(TILT_STEP, 0.0),
            KeyCode::ArrowUp => self.tilt.nudge(0.0, TILT_STEP),
            KeyCode::ArrowDown => self.tilt.nudge(0.0, -TILT_STEP),
            KeyCode::Space => self.tilt.level(),
            _ => return false,
        }
        log::trace!("keyboard tilt {key:?}");
        true
    }
}

impl Default for DesktopWinitPlatform {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
#[path = "tests/platform_tests.rs"]
mod tests;
