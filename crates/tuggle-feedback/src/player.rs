use std::rc::Rc;

use crate::haptics::{unit, HapticBackend, HapticEvent};

pub type PlayerId = u64;

/// A state change sent to the engine for one continuous player.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerCommand {
    Start { intensity: f32, sharpness: f32 },
    Load(String),
    Play,
    Pause,
    Stop,
    SetLooping(bool),
    SetIntensity(f32),
    SetSharpness(f32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Sustained, real-time adjustable vibration. Stops itself when dropped.
pub struct HapticPlayer {
    id: PlayerId,
    backend: Rc<dyn HapticBackend>,
    state: PlayerState,
    intensity: f32,
    sharpness: f32,
    looping: bool,
    pattern: Option<String>,
}

impl HapticPlayer {
    pub(crate) fn new(id: PlayerId, backend: Rc<dyn HapticBackend>) -> Self {
        Self {
            id,
            backend,
            state: PlayerState::Stopped,
            intensity: 1.0,
            sharpness: 0.5,
            looping: false,
            pattern: None,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Starts a continuous vibration at the given parameters.
    pub fn start(&mut self, intensity: f32, sharpness: f32) {
        self.intensity = unit(intensity);
        self.sharpness = unit(sharpness);
        self.state = PlayerState::Playing;
        self.send(PlayerCommand::Start {
            intensity: self.intensity,
            sharpness: self.sharpness,
        });
    }

    /// Loads a pattern file for [`play`](Self::play). Returns `false` when
    /// the engine is unavailable.
    pub fn load(&mut self, filename: &str) -> bool {
        if !self.backend.is_supported() {
            return false;
        }
        self.pattern = Some(filename.to_owned());
        self.send(PlayerCommand::Load(filename.to_owned()));
        true
    }

    pub fn play(&mut self) {
        if self.state == PlayerState::Playing {
            return;
        }
        self.state = PlayerState::Playing;
        self.send(PlayerCommand::Play);
    }

    pub fn pause(&mut self) {
        if self.state != PlayerState::Playing {
            return;
        }
        self.state = PlayerState::Paused;
        self.send(PlayerCommand::Pause);
    }

    pub fn stop(&mut self) {
        if self.state == PlayerState::Stopped {
            return;
        }
        self.state = PlayerState::Stopped;
        self.send(PlayerCommand::Stop);
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    pub fn set_looping(&mut self, looping: bool) {
        if self.looping != looping {
            self.looping = looping;
            self.send(PlayerCommand::SetLooping(looping));
        }
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = unit(intensity);
        if self.state == PlayerState::Playing {
            self.send(PlayerCommand::SetIntensity(self.intensity));
        }
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn set_sharpness(&mut self, sharpness: f32) {
        self.sharpness = unit(sharpness);
        if self.state == PlayerState::Playing {
            self.send(PlayerCommand::SetSharpness(self.sharpness));
        }
    }

    pub fn sharpness(&self) -> f32 {
        self.sharpness
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    fn send(&self, command: PlayerCommand) {
        self.backend.emit(HapticEvent::Player {
            id: self.id,
            command,
        });
    }
}

impl Drop for HapticPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for HapticPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HapticPlayer")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("intensity", &self.intensity)
            .field("sharpness", &self.sharpness)
            .field("looping", &self.looping)
            .finish()
    }
}
