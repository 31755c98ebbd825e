//! Nine pads, each playing a sound clip with a matching haptic pattern.
//!
//! The page reports itself as interacting for as long as a clip plays, so
//! the carousel stays put until the sound is over.

use tuggle_feedback::Sound;
use tuggle_foundation::Duration;
use tuggle_ui::prelude::*;

use super::{disc, rgb, Palette};

pub const PAD_COUNT: usize = 9;
const RADIUS_RATIO: f32 = 0.10;
const SPACING_RATIO: f32 = 0.04;
const PULSE_RATE: f32 = 8.0;

/// A pad's sound asset and haptic pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clip {
    pub name: &'static str,
    pub pattern: &'static str,
    pub duration_ms: u64,
}

pub const CLIPS: [Clip; PAD_COUNT] = [
    Clip { name: "fanfare", pattern: "fanfare.ahap", duration_ms: 3000 },
    Clip { name: "gamecube", pattern: "gamecube.ahap", duration_ms: 4500 },
    Clip { name: "counter", pattern: "counter.ahap", duration_ms: 1200 },
    Clip { name: "eating", pattern: "eating.ahap", duration_ms: 1000 },
    Clip { name: "kricketune", pattern: "kricketune.ahap", duration_ms: 2000 },
    Clip { name: "lalilulelo", pattern: "lalilulelo.ahap", duration_ms: 2500 },
    Clip { name: "oof", pattern: "oof.ahap", duration_ms: 600 },
    Clip { name: "trick", pattern: "trick.ahap", duration_ms: 1500 },
    Clip { name: "sans", pattern: "sans.ahap", duration_ms: 2200 },
];

const PALETTES: [Palette; PAD_COUNT] = [
    Palette::new(rgb(255, 82, 82), rgb(200, 50, 50), rgb(180, 120, 120)),
    Palette::new(rgb(255, 177, 66), rgb(200, 140, 40), rgb(180, 155, 115)),
    Palette::new(rgb(255, 241, 118), rgb(200, 190, 80), rgb(180, 175, 135)),
    Palette::new(rgb(129, 236, 129), rgb(90, 180, 90), rgb(135, 170, 135)),
    Palette::new(rgb(100, 221, 255), rgb(60, 170, 200), rgb(130, 165, 180)),
    Palette::new(rgb(130, 177, 255), rgb(90, 130, 200), rgb(135, 150, 180)),
    Palette::new(rgb(179, 136, 255), rgb(140, 100, 200), rgb(155, 140, 180)),
    Palette::new(rgb(255, 145, 200), rgb(200, 110, 160), rgb(180, 145, 165)),
    Palette::new(rgb(200, 200, 200), rgb(150, 150, 150), rgb(160, 160, 160)),
];

const PLAYING: [Color; PAD_COUNT] = [
    rgb(255, 120, 120),
    rgb(255, 200, 100),
    rgb(255, 250, 160),
    rgb(160, 255, 160),
    rgb(140, 240, 255),
    rgb(170, 210, 255),
    rgb(210, 180, 255),
    rgb(255, 185, 230),
    rgb(240, 240, 240),
];

/// Audio key for pad `index`.
pub fn sound_key(index: usize) -> String {
    format!("f9_sound_{index}")
}

#[derive(Debug)]
struct Playback {
    pad: usize,
    key: String,
    elapsed: f32,
}

#[derive(Debug)]
pub struct Soundboard {
    core: PageCore,
    buttons: ButtonGroup,
    pads: Vec<NodeId>,
    playback: Option<Playback>,
}

impl Soundboard {
    pub fn new() -> Self {
        Self {
            core: PageCore::new("Soundboard"),
            buttons: ButtonGroup::new(),
            pads: Vec::with_capacity(PAD_COUNT),
            playback: None,
        }
    }

    /// The pad whose clip is playing.
    pub fn playing_pad(&self) -> Option<usize> {
        self.playback.as_ref().map(|playback| playback.pad)
    }

    /// Centre of pad `index` in a 3x3 grid, 0 at the top left.
    pub fn pad_center(&self, index: usize) -> Point {
        let width = self.core.page_size().width;
        let cell = width * RADIUS_RATIO * 2.0 + width * SPACING_RATIO;
        let col = (index % 3) as f32 - 1.0;
        let row = 1.0 - (index / 3) as f32;
        self.core.center() + Point::new(col * cell, row * cell)
    }

    fn trigger(&mut self, pad: usize, ctx: &mut PageContext<'_>) {
        self.stop_playback(ctx);
        let clip = CLIPS[pad];
        if !ctx.feedback.haptics.play_pattern(clip.pattern) {
            ctx.feedback.haptics.heavy();
        }
        let key = sound_key(pad);
        ctx.feedback.audio.play(&key, false, true);
        log::debug!("soundboard pad {pad} playing {}", clip.name);
        self.playback = Some(Playback {
            pad,
            key,
            elapsed: 0.0,
        });
        self.core.set_interacting(true);
        if let Some(node) = self.core.root.child_mut(self.pads[pad]) {
            node.color = PLAYING[pad];
        }
    }

    fn stop_playback(&mut self, ctx: &mut PageContext<'_>) {
        let Some(playback) = self.playback.take() else {
            return;
        };
        ctx.feedback.audio.clear(&playback.key);
        let color = PALETTES[playback.pad].resolve(self.core.is_active(), false);
        if let Some(node) = self.core.root.child_mut(self.pads[playback.pad]) {
            node.color = color;
            node.scale = 1.0;
        }
        self.core.set_interacting(false);
    }
}

impl Default for Soundboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for Soundboard {
    fn core(&self) -> &PageCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PageCore {
        &mut self.core
    }

    fn build_content(&mut self, ctx: &mut PageContext<'_>) {
        let radius = self.core.page_size().width * RADIUS_RATIO;
        for (i, clip) in CLIPS.iter().enumerate() {
            ctx.feedback.audio.register_sound(
                sound_key(i),
                Sound::new(
                    format!("sounds/{}.wav", clip.name),
                    Duration::from_millis(clip.duration_ms),
                ),
            );
            let name = format!("soundboard_{i}");
            let center = self.pad_center(i);
            let node = self.core.root.add_child(
                disc(radius, PALETTES[i].normal)
                    .with_name(name.clone())
                    .with_position(center),
            );
            self.buttons.add(&name, &[node], HitShape::Circle);
            self.pads.push(node);
        }
    }

    fn update(&mut self, timestep: f32, ctx: &mut PageContext<'_>) {
        let Some(playback) = &mut self.playback else {
            return;
        };
        playback.elapsed += timestep;
        if !ctx.feedback.audio.is_playing(&playback.key) {
            self.stop_playback(ctx);
            return;
        }
        let pulse = 0.95 + 0.05 * (playback.elapsed * PULSE_RATE).sin();
        if let Some(node) = self.core.root.child_mut(self.pads[playback.pad]) {
            node.scale = pulse;
        }
    }

    fn set_active(&mut self, active: bool, _ctx: &mut PageContext<'_>) {
        self.core.set_active(active);
        let playing = self.playing_pad();
        for (i, id) in self.pads.iter().enumerate() {
            let color = if playing == Some(i) {
                PLAYING[i]
            } else {
                PALETTES[i].resolve(active, false)
            };
            if let Some(node) = self.core.root.child_mut(*id) {
                node.color = color;
            }
        }
    }

    fn activate_inputs(&mut self) {
        self.buttons.activate();
    }

    fn deactivate_inputs(&mut self) {
        self.buttons.deactivate();
    }

    fn pointer_event(&mut self, event: &PagePointerEvent, ctx: &mut PageContext<'_>) {
        if !self.core.is_active() {
            return;
        }
        for change in self.buttons.dispatch(&self.core.root, event) {
            if change.down {
                self.trigger(change.index, ctx);
            }
        }
    }

    fn dispose(&mut self, ctx: &mut PageContext<'_>) {
        self.stop_playback(ctx);
    }
}
