use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use tuggle_foundation::{Clock, Duration, Instant};

/// A registered sound asset.
#[derive(Clone, Debug, PartialEq)]
pub struct Sound {
    pub source: String,
    pub duration: Duration,
}

impl Sound {
    pub fn new(source: impl Into<String>, duration: Duration) -> Self {
        Self {
            source: source.into(),
            duration,
        }
    }
}

/// Native audio engine binding, addressed by sound key.
pub trait AudioBackend {
    fn play(&mut self, key: &str, sound: &Sound, looping: bool, volume: f32, force: bool) -> bool;
    fn stop(&mut self, key: &str);
    fn is_active(&self, key: &str) -> bool;
}

/// Sound effect registry and playback front end.
pub struct AudioController {
    sounds: IndexMap<String, Sound>,
    volume: f32,
    backend: Box<dyn AudioBackend>,
}

impl AudioController {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            sounds: IndexMap::new(),
            volume: 1.0,
            backend,
        }
    }

    pub fn register_sound(&mut self, key: impl Into<String>, sound: Sound) {
        self.sounds.insert(key.into(), sound);
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.sounds.contains_key(key)
    }

    /// Plays `key` from the start, restarting it if it was already playing.
    /// Returns `false` for an unregistered key or a refused playback.
    pub fn play(&mut self, key: &str, looping: bool, force: bool) -> bool {
        let Some(sound) = self.sounds.get(key) else {
            log::warn!("no sound registered for {key}");
            return false;
        };
        if self.backend.is_active(key) {
            self.backend.stop(key);
        }
        self.backend.play(key, sound, looping, self.volume, force)
    }

    pub fn stop_sound(&mut self, key: &str) {
        if self.backend.is_active(key) {
            self.backend.stop(key);
        }
    }

    /// Releases the playback slot for `key`.
    pub fn clear(&mut self, key: &str) {
        self.stop_sound(key);
    }

    pub fn is_playing(&self, key: &str) -> bool {
        self.backend.is_active(key)
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Stops every registered sound.
    pub fn stop_all(&mut self) {
        for key in self.sounds.keys() {
            if self.backend.is_active(key) {
                self.backend.stop(key);
            }
        }
    }

    pub fn sound_keys(&self) -> impl Iterator<Item = &str> {
        self.sounds.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for AudioController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioController")
            .field("sounds", &self.sounds.len())
            .field("volume", &self.volume)
            .finish()
    }
}

#[derive(Clone, Copy, Debug)]
struct Voice {
    started: Instant,
    duration: Duration,
    looping: bool,
}

/// Audio backend that produces no sound but tracks playback timing, so
/// pages polling `is_playing` behave as they would with real output.
pub struct SilentAudio {
    clock: Rc<dyn Clock>,
    voices: HashMap<String, Voice>,
}

impl SilentAudio {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            voices: HashMap::new(),
        }
    }
}

impl AudioBackend for SilentAudio {
    fn play(&mut self, key: &str, sound: &Sound, looping: bool, volume: f32, _force: bool) -> bool {
        log::debug!(target: "tuggle::audio", "play {key} ({}) volume={volume:.2}", sound.source);
        self.voices.insert(
            key.to_owned(),
            Voice {
                started: self.clock.now(),
                duration: sound.duration,
                looping,
            },
        );
        true
    }

    fn stop(&mut self, key: &str) {
        self.voices.remove(key);
    }

    fn is_active(&self, key: &str) -> bool {
        self.voices.get(key).is_some_and(|voice| {
            voice.looping
                || self.clock.now().saturating_duration_since(voice.started) < voice.duration
        })
    }
}

#[cfg(test)]
#[path = "tests/audio_tests.rs"]
mod tests;
