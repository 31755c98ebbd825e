//! Six toggles, each repeating a transient at its own sharpness and rate
//! while switched on.

use tuggle_animation::approach;
use tuggle_foundation::PointerEventKind;
use tuggle_ui::prelude::*;

use super::{disc, rgb, Palette};

pub const BUTTON_COUNT: usize = 6;
const COLUMNS: usize = 2;
const ROWS: usize = 3;
const RADIUS_RATIO: f32 = 0.10;
const SPACING_RATIO: f32 = 0.08;
const TOGGLED_SCALE: f32 = 1.2;
const ANIM_DURATION: f32 = 0.15;
const SCALE_EPSILON: f32 = 0.001;

/// Transient sharpness per button, soft and sharp alternating.
pub const SHARPNESS: [f32; BUTTON_COUNT] = [0.1, 0.9, 0.1, 0.9, 0.1, 0.9];

/// Seconds between repeats per button; lower rows beat faster.
pub const INTERVALS: [f32; BUTTON_COUNT] = [0.12, 0.12, 0.06, 0.06, 0.03, 0.03];

const PALETTES: [Palette; BUTTON_COUNT] = [
    Palette::new(rgb(255, 200, 180), rgb(225, 170, 150), rgb(200, 185, 175)),
    Palette::new(rgb(180, 200, 255), rgb(150, 170, 225), rgb(175, 185, 200)),
    Palette::new(rgb(255, 140, 100), rgb(225, 110, 70), rgb(200, 160, 150)),
    Palette::new(rgb(100, 150, 255), rgb(70, 120, 225), rgb(150, 165, 200)),
    Palette::new(rgb(255, 80, 60), rgb(225, 50, 30), rgb(200, 140, 135)),
    Palette::new(rgb(60, 100, 255), rgb(30, 70, 225), rgb(135, 150, 200)),
];

#[derive(Clone, Copy, Debug)]
struct Toggle {
    node: NodeId,
    on: bool,
    timer: f32,
    scale: f32,
}

#[derive(Debug)]
pub struct SnakeEyes {
    core: PageCore,
    buttons: ButtonGroup,
    toggles: Vec<Toggle>,
}

impl SnakeEyes {
    pub fn new() -> Self {
        Self {
            core: PageCore::new("Snake Eyes"),
            buttons: ButtonGroup::new(),
            toggles: Vec::with_capacity(BUTTON_COUNT),
        }
    }

    pub fn is_on(&self, index: usize) -> bool {
        self.toggles.get(index).is_some_and(|toggle| toggle.on)
    }

    /// Centre of button `index`; 0 is top left, filled row by row.
    pub fn button_center(&self, index: usize) -> Point {
        let width = self.core.page_size().width;
        let radius = width * RADIUS_RATIO;
        let cell = radius * 2.0 + width * SPACING_RATIO;
        let col = (index % COLUMNS) as f32;
        let row = (ROWS - 1 - index / COLUMNS) as f32;
        let c = self.core.center();
        Point::new(
            c.x + (col - (COLUMNS - 1) as f32 / 2.0) * cell,
            c.y + (row - (ROWS - 1) as f32 / 2.0) * cell,
        )
    }

    fn toggle(&mut self, index: usize, ctx: &mut PageContext<'_>) {
        let Some(toggle) = self.toggles.get_mut(index) else {
            return;
        };
        toggle.on = !toggle.on;
        log::debug!(
            "snake eyes {index} {} (sharpness {}, every {}s)",
            if toggle.on { "on" } else { "off" },
            SHARPNESS[index],
            INTERVALS[index]
        );
        if toggle.on {
            ctx.feedback.haptics.transient(1.0, SHARPNESS[index]);
            toggle.timer = INTERVALS[index];
        } else {
            ctx.feedback.haptics.light();
            toggle.timer = 0.0;
        }
    }

    fn recolor(&mut self) {
        let active = self.core.is_active();
        for (i, toggle) in self.toggles.iter().enumerate() {
            let color = PALETTES[i].resolve(active, self.buttons.is_down(i));
            if let Some(node) = self.core.root.child_mut(toggle.node) {
                node.color = color;
            }
        }
    }
}

impl Default for SnakeEyes {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for SnakeEyes {
    fn core(&self) -> &PageCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PageCore {
        &mut self.core
    }

    fn build_content(&mut self, _ctx: &mut PageContext<'_>) {
        let radius = self.core.page_size().width * RADIUS_RATIO;
        for (i, palette) in PALETTES.iter().enumerate() {
            let name = format!("snakeyes_{i}");
            let center = self.button_center(i);
            let node = self.core.root.add_child(
                disc(radius, palette.normal)
                    .with_name(name.clone())
                    .with_position(center),
            );
            self.buttons.add(&name, &[node], HitShape::Circle);
            self.toggles.push(Toggle {
                node,
                on: false,
                timer: 0.0,
                scale: 1.0,
            });
        }
    }

    fn update(&mut self, timestep: f32, ctx: &mut PageContext<'_>) {
        let active = self.core.is_active();
        for (i, toggle) in self.toggles.iter_mut().enumerate() {
            let target = if toggle.on { TOGGLED_SCALE } else { 1.0 };
            let speed = timestep / ANIM_DURATION;
            toggle.scale = approach(toggle.scale, target, speed * 6.0, SCALE_EPSILON);
            if let Some(node) = self.core.root.child_mut(toggle.node) {
                node.scale = toggle.scale;
            }

            if active && toggle.on {
                toggle.timer -= timestep;
                if toggle.timer <= 0.0 {
                    ctx.feedback.haptics.transient(1.0, SHARPNESS[i]);
                    toggle.timer = INTERVALS[i];
                }
            }
        }
    }

    fn set_active(&mut self, active: bool, _ctx: &mut PageContext<'_>) {
        self.core.set_active(active);
        self.recolor();
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
        let changes = self.buttons.dispatch(&self.core.root, event);
        for change in &changes {
            // A cancelled press does not count as a toggle.
            if !change.down && event.kind == PointerEventKind::Up {
                self.toggle(change.index, ctx);
            }
        }
        if !changes.is_empty() {
            self.recolor();
        }
    }
}
