//! Output and sensor collaborators used by carousel pages.
//!
//! Everything here is fire-and-forget from the caller's point of view.
//! Missing hardware is represented by a no-op backend or an absent sensor,
//! never by an error.

mod audio;
mod haptics;
mod player;
mod recording;
mod sensors;

pub use audio::{AudioBackend, AudioController, SilentAudio, Sound};
pub use haptics::{HapticBackend, HapticEvent, HapticPreset, Haptics, LogHaptics, NoopHaptics};
pub use player::{HapticPlayer, PlayerCommand, PlayerId, PlayerState};
pub use recording::RecordingHaptics;
pub use sensors::{Acceleration, Accelerometer, SharedTilt};

use std::rc::Rc;
use tuggle_foundation::Clock;

/// The collaborator bundle handed to pages each frame.
pub struct Feedback {
    pub haptics: Haptics,
    pub audio: AudioController,
    pub accelerometer: Option<Box<dyn Accelerometer>>,
}

impl Feedback {
    pub fn new(haptics: Haptics, audio: AudioController) -> Self {
        Self {
            haptics,
            audio,
            accelerometer: None,
        }
    }

    /// No haptics, simulated audio, no accelerometer.
    pub fn silent(clock: Rc<dyn Clock>) -> Self {
        Self::new(
            Haptics::new(Rc::new(NoopHaptics)),
            AudioController::new(Box::new(SilentAudio::new(clock))),
        )
    }

    pub fn with_accelerometer(mut self, accelerometer: Box<dyn Accelerometer>) -> Self {
        self.accelerometer = Some(accelerometer);
        self
    }

    /// Current acceleration, if a sensor is present.
    pub fn acceleration(&self) -> Option<Acceleration> {
        self.accelerometer.as_ref().map(|sensor| sensor.acceleration())
    }
}

impl std::fmt::Debug for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feedback")
            .field("haptics_supported", &self.haptics.is_supported())
            .field("audio", &self.audio)
            .field("accelerometer", &self.accelerometer.is_some())
            .finish()
    }
}
