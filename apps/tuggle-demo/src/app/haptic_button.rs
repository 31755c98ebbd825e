//! A round, draggable button that answers pointer motion with haptics.
//!
//! While held the button follows the pointer against a spring that stiffens
//! towards `max_drag`, shrinks to `pressed_scale` and emits a
//! velocity-scaled texture chosen by its [`HapticStyle`]. On release it
//! snaps back home.

use tuggle_animation::approach;
use tuggle_feedback::Haptics;
use tuggle_ui::{ButtonGroup, HitShape, NodeId, SceneNode};
use tuggle_ui_graphics::{Color, Point};

use super::{disc, rgb, Palette};

/// Drag speed, in scene units per second, that maps to full intensity.
pub const MAX_HAPTIC_VELOCITY: f32 = 1000.0;

/// Textures below this intensity are skipped.
pub const MIN_HAPTIC_INTENSITY: f32 = 0.05;

const SCALE_EPSILON: f32 = 0.001;

/// Press pulse and drag texture of a [`HapticButton`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HapticStyle {
    /// Medium press, fast crisp transients.
    #[default]
    Rattle,
    /// Light press, soft low-sharpness transients.
    Buzz,
    /// Heavy press, sharp ticks above a speed threshold.
    Tick,
    /// Heavy press, dull thumps near the end of travel.
    Thump,
    Tap,
    /// Short buzzes whose length follows the drag speed.
    BuzzPulse,
    Selection,
}

impl HapticStyle {
    pub const ALL: [HapticStyle; 7] = [
        HapticStyle::Rattle,
        HapticStyle::Buzz,
        HapticStyle::Tick,
        HapticStyle::Thump,
        HapticStyle::Tap,
        HapticStyle::BuzzPulse,
        HapticStyle::Selection,
    ];

    fn press(self, haptics: &Haptics) {
        match self {
            HapticStyle::Rattle => haptics.medium(),
            HapticStyle::Buzz => haptics.light(),
            HapticStyle::Tick | HapticStyle::Thump => haptics.heavy(),
            HapticStyle::Tap => haptics.tap(0.8, 0.5),
            HapticStyle::BuzzPulse => haptics.buzz(0.7, 0.3, 0.15),
            HapticStyle::Selection => haptics.selection(),
        }
    }

    /// Emits one texture pulse and returns the cooldown before the next, or
    /// `None` when this intensity produces nothing.
    fn texture(self, intensity: f32, travel: f32, haptics: &Haptics) -> Option<f32> {
        match self {
            HapticStyle::Rattle => {
                haptics.transient(intensity, 0.5);
                Some(0.04 * (1.0 - intensity * 0.5) + 0.02)
            }
            HapticStyle::Buzz => {
                haptics.transient(intensity * 0.7, 0.2);
                Some(0.03)
            }
            HapticStyle::Tick if intensity > 0.3 => {
                haptics.transient(0.8, 0.9);
                Some(0.08)
            }
            HapticStyle::Thump if travel > 0.5 && intensity > 0.2 => {
                haptics.transient(0.9, 0.1);
                Some(0.12)
            }
            HapticStyle::Tap => {
                haptics.tap(intensity, 0.5);
                Some(0.05 * (1.0 - intensity * 0.3) + 0.03)
            }
            HapticStyle::BuzzPulse if intensity > 0.25 => {
                let duration = 0.05 + intensity * 0.1;
                haptics.buzz(intensity * 0.8, 0.25, duration);
                Some(duration + 0.05)
            }
            HapticStyle::Selection if intensity > 0.15 => {
                haptics.selection();
                Some(0.06)
            }
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HapticButtonConfig {
    pub radius: f32,
    pub palette: Palette,
    pub style: HapticStyle,
    /// Maximum travel from home, in scene units.
    pub max_drag: f32,
    /// Spring stiffness in `[0, 1]`; higher resists sooner.
    pub spring_k: f32,
    pub pressed_scale: f32,
    /// Seconds for the press scale animation.
    pub anim_duration: f32,
}

impl Default for HapticButtonConfig {
    fn default() -> Self {
        Self {
            radius: 50.0,
            palette: Palette::new(rgb(100, 149, 237), rgb(70, 119, 207), rgb(150, 180, 220)),
            style: HapticStyle::Rattle,
            max_drag: 12.0,
            spring_k: 0.4,
            pressed_scale: 0.85,
            anim_duration: 0.12,
        }
    }
}

impl HapticButtonConfig {
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_style(mut self, style: HapticStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_spring(mut self, max_drag: f32, spring_k: f32) -> Self {
        self.max_drag = max_drag;
        self.spring_k = spring_k;
        self
    }
}

#[derive(Debug)]
pub struct HapticButton {
    config: HapticButtonConfig,
    node: NodeId,
    button: usize,
    home: Point,
    active: bool,
    pressed: bool,
    drag_offset: Point,
    drag_velocity: Point,
    last_pointer: Point,
    scale: f32,
    cooldown: f32,
}

impl HapticButton {
    /// Adds the button's disc to `root` at `home` and registers it in
    /// `buttons` under `name`.
    pub fn build(
        root: &mut SceneNode,
        buttons: &mut ButtonGroup,
        name: &str,
        home: Point,
        config: HapticButtonConfig,
    ) -> Self {
        let node = root.add_child(
            disc(config.radius, config.palette.normal)
                .with_name(name)
                .with_position(home),
        );
        let button = buttons.add(name, &[node], HitShape::Circle);
        Self {
            config,
            node,
            button,
            home,
            active: true,
            pressed: false,
            drag_offset: Point::ZERO,
            drag_velocity: Point::ZERO,
            last_pointer: Point::ZERO,
            scale: 1.0,
            cooldown: 0.0,
        }
    }

    pub fn config(&self) -> &HapticButtonConfig {
        &self.config
    }

    /// Index of this button in the page's [`ButtonGroup`].
    pub fn button_index(&self) -> usize {
        self.button
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn home(&self) -> Point {
        self.home
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn drag_offset(&self) -> Point {
        self.drag_offset
    }

    pub fn drag_velocity(&self) -> Point {
        self.drag_velocity
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Starts a press with the pointer at `pointer` (scene coordinates).
    pub fn press(&mut self, pointer: Point, root: &mut SceneNode, haptics: &Haptics) {
        self.pressed = true;
        self.drag_offset = Point::ZERO;
        self.drag_velocity = Point::ZERO;
        self.last_pointer = pointer;
        self.cooldown = 0.0;
        self.config.style.press(haptics);
        self.apply_color(root);
    }

    pub fn release(&mut self, root: &mut SceneNode) {
        self.pressed = false;
        self.drag_offset = Point::ZERO;
        self.drag_velocity = Point::ZERO;
        if let Some(node) = root.child_mut(self.node) {
            node.position = self.home;
        }
        self.apply_color(root);
    }

    /// Advances drag and scale animation. `pointer` is the current pointer
    /// position in scene coordinates and is ignored unless pressed.
    pub fn update(&mut self, dt: f32, pointer: Point, root: &mut SceneNode, haptics: &Haptics) {
        if self.pressed {
            self.follow(dt, pointer, haptics);
        }

        let target = if self.pressed {
            self.config.pressed_scale
        } else {
            1.0
        };
        let speed = dt / self.config.anim_duration;
        self.scale = approach(self.scale, target, speed * 8.0, SCALE_EPSILON);

        if let Some(node) = root.child_mut(self.node) {
            node.position = self.home + self.drag_offset;
            node.scale = self.scale;
        }
    }

    pub fn set_active(&mut self, active: bool, root: &mut SceneNode) {
        self.active = active;
        self.apply_color(root);
    }

    fn follow(&mut self, dt: f32, pointer: Point, haptics: &Haptics) {
        let delta = pointer - self.last_pointer;
        self.last_pointer = pointer;
        self.drag_velocity = delta / dt.max(0.001);

        let mut offset = self.drag_offset + delta;
        if offset.length() > 0.001 {
            let n = (offset.length() / self.config.max_drag).min(1.0);
            let dampening = (1.0 - self.config.spring_k * n * n).max(0.1);
            offset = self.drag_offset + delta * dampening;
            if offset.length() > self.config.max_drag {
                offset = offset.normalized() * self.config.max_drag;
            }
        }
        self.drag_offset = offset;

        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return;
        }
        let intensity =
            self.drag_velocity.length().min(MAX_HAPTIC_VELOCITY) / MAX_HAPTIC_VELOCITY;
        if intensity < MIN_HAPTIC_INTENSITY {
            return;
        }
        let travel = self.drag_offset.length() / self.config.max_drag;
        if let Some(cooldown) = self.config.style.texture(intensity, travel, haptics) {
            self.cooldown = cooldown;
        }
    }

    fn apply_color(&self, root: &mut SceneNode) {
        let color: Color = self.config.palette.resolve(self.active, self.pressed);
        if let Some(node) = root.child_mut(self.node) {
            node.color = color;
        }
    }
}

#[cfg(test)]
#[path = "../tests/haptic_button_tests.rs"]
mod tests;
