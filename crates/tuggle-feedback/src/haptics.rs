use std::cell::Cell;
use std::rc::Rc;

use crate::player::{HapticPlayer, PlayerCommand, PlayerId};

/// System-defined impact and selection pulses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HapticPreset {
    Light,
    Medium,
    Heavy,
    Selection,
}

/// One request to the haptic engine.
#[derive(Clone, Debug, PartialEq)]
pub enum HapticEvent {
    Preset(HapticPreset),
    Tap { intensity: f32, sharpness: f32 },
    Transient { intensity: f32, sharpness: f32 },
    Buzz { intensity: f32, sharpness: f32, duration: f32 },
    Pattern(String),
    Player { id: PlayerId, command: PlayerCommand },
}

/// Native haptic engine binding.
pub trait HapticBackend {
    fn is_supported(&self) -> bool;

    fn emit(&self, event: HapticEvent);

    /// Plays a pattern file by name. Returns `false` when the engine cannot
    /// play it.
    fn play_pattern(&self, filename: &str) -> bool {
        if !self.is_supported() {
            return false;
        }
        self.emit(HapticEvent::Pattern(filename.to_owned()));
        true
    }
}

/// Backend for devices without a haptic engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHaptics;

impl HapticBackend for NoopHaptics {
    fn is_supported(&self) -> bool {
        false
    }

    fn emit(&self, _event: HapticEvent) {}
}

/// Backend that reports every request through `log` at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogHaptics;

impl HapticBackend for LogHaptics {
    fn is_supported(&self) -> bool {
        true
    }

    fn emit(&self, event: HapticEvent) {
        log::debug!(target: "tuggle::haptics", "{event:?}");
    }
}

/// Cloneable handle over a haptic backend.
///
/// Intensity and sharpness are clamped to `[0, 1]` before they reach the
/// backend.
#[derive(Clone)]
pub struct Haptics {
    backend: Rc<dyn HapticBackend>,
    next_player: Rc<Cell<PlayerId>>,
}

impl Haptics {
    pub fn new(backend: Rc<dyn HapticBackend>) -> Self {
        Self {
            backend,
            next_player: Rc::new(Cell::new(1)),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.backend.is_supported()
    }

    pub fn light(&self) {
        self.preset(HapticPreset::Light);
    }

    pub fn medium(&self) {
        self.preset(HapticPreset::Medium);
    }

    pub fn heavy(&self) {
        self.preset(HapticPreset::Heavy);
    }

    pub fn selection(&self) {
        self.preset(HapticPreset::Selection);
    }

    pub fn preset(&self, preset: HapticPreset) {
        self.backend.emit(HapticEvent::Preset(preset));
    }

    pub fn tap(&self, intensity: f32, sharpness: f32) {
        self.backend.emit(HapticEvent::Tap {
            intensity: unit(intensity),
            sharpness: unit(sharpness),
        });
    }

    pub fn transient(&self, intensity: f32, sharpness: f32) {
        self.backend.emit(HapticEvent::Transient {
            intensity: unit(intensity),
            sharpness: unit(sharpness),
        });
    }

    pub fn buzz(&self, intensity: f32, sharpness: f32, duration: f32) {
        self.backend.emit(HapticEvent::Buzz {
            intensity: unit(intensity),
            sharpness: unit(sharpness),
            duration: duration.max(0.0),
        });
    }

    pub fn play_pattern(&self, filename: &str) -> bool {
        let played = self.backend.play_pattern(filename);
        if !played {
            log::debug!("haptic pattern {filename} unavailable");
        }
        played
    }

    /// Creates a continuous player bound to this backend.
    pub fn player(&self) -> HapticPlayer {
        let id = self.next_player.get();
        self.next_player.set(id + 1);
        HapticPlayer::new(id, Rc::clone(&self.backend))
    }
}

impl std::fmt::Debug for Haptics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Haptics")
            .field("supported", &self.is_supported())
            .finish()
    }
}

pub(crate) fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "tests/haptics_tests.rs"]
mod tests;
