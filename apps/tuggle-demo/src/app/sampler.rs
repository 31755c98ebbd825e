//! Seven buttons, one per haptic style, laid out 3-2-2.

use tuggle_ui::prelude::*;

use super::haptic_button::{HapticButton, HapticButtonConfig, HapticStyle};
use super::{rgb, Palette};

const RADIUS_RATIO: f32 = 0.12;
const SPACING_RATIO: f32 = 0.08;
const ROW_GAP: f32 = 1.1;
const MAX_DRAG: f32 = 10.0;
const SPRING_K: f32 = 0.5;

/// Palette per style, in [`HapticStyle::ALL`] order.
const PALETTES: [Palette; 7] = [
    Palette::new(rgb(255, 107, 107), rgb(225, 77, 77), rgb(200, 150, 150)),
    Palette::new(rgb(78, 205, 196), rgb(48, 175, 166), rgb(150, 200, 195)),
    Palette::new(rgb(255, 230, 109), rgb(225, 200, 79), rgb(200, 195, 150)),
    Palette::new(rgb(170, 111, 255), rgb(140, 81, 225), rgb(180, 160, 200)),
    Palette::new(rgb(255, 165, 89), rgb(225, 135, 59), rgb(200, 175, 160)),
    Palette::new(rgb(89, 165, 255), rgb(59, 135, 225), rgb(160, 175, 200)),
    Palette::new(rgb(165, 255, 165), rgb(135, 225, 135), rgb(175, 200, 175)),
];

#[derive(Debug)]
pub struct Sampler {
    core: PageCore,
    buttons: ButtonGroup,
    samples: Vec<HapticButton>,
}

impl Sampler {
    pub fn new() -> Self {
        Self {
            core: PageCore::new("Sampler"),
            buttons: ButtonGroup::new(),
            samples: Vec::with_capacity(HapticStyle::ALL.len()),
        }
    }

    pub fn samples(&self) -> &[HapticButton] {
        &self.samples
    }

    /// Button centres: three on top, two in the middle, two below.
    fn layout(&self, cell: f32) -> [Point; 7] {
        let c = self.core.center();
        let top = c.y + cell * ROW_GAP;
        let bottom = c.y - cell * ROW_GAP;
        let half = cell * 0.5;
        [
            Point::new(c.x - cell, top),
            Point::new(c.x, top),
            Point::new(c.x + cell, top),
            Point::new(c.x - half, c.y),
            Point::new(c.x + half, c.y),
            Point::new(c.x - half, bottom),
            Point::new(c.x + half, bottom),
        ]
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for Sampler {
    fn core(&self) -> &PageCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PageCore {
        &mut self.core
    }

    fn build_content(&mut self, _ctx: &mut PageContext<'_>) {
        let width = self.core.page_size().width;
        let radius = width * RADIUS_RATIO;
        let cell = radius * 2.0 + width * SPACING_RATIO;
        let positions = self.layout(cell);
        for (i, style) in HapticStyle::ALL.into_iter().enumerate() {
            let config = HapticButtonConfig::default()
                .with_radius(radius)
                .with_style(style)
                .with_palette(PALETTES[i])
                .with_spring(MAX_DRAG, SPRING_K);
            let button = HapticButton::build(
                &mut self.core.root,
                &mut self.buttons,
                &format!("sampler_{i}"),
                positions[i],
                config,
            );
            self.samples.push(button);
        }
    }

    fn update(&mut self, timestep: f32, ctx: &mut PageContext<'_>) {
        let pointer = ctx.pointer_scene();
        for sample in &mut self.samples {
            sample.update(timestep, pointer, &mut self.core.root, &ctx.feedback.haptics);
        }
    }

    fn set_active(&mut self, active: bool, _ctx: &mut PageContext<'_>) {
        self.core.set_active(active);
        for sample in &mut self.samples {
            sample.set_active(active, &mut self.core.root);
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
            let Some(sample) = self
                .samples
                .iter_mut()
                .find(|sample| sample.button_index() == change.index)
            else {
                continue;
            };
            if change.down {
                sample.press(
                    ctx.to_scene(event.screen),
                    &mut self.core.root,
                    &ctx.feedback.haptics,
                );
            } else {
                sample.release(&mut self.core.root);
            }
        }
        let held = self.samples.iter().any(HapticButton::is_pressed);
        self.core.set_interacting(held);
    }
}
