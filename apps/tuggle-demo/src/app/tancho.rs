//! One big rattly button.

use tuggle_ui::prelude::*;

use super::haptic_button::{HapticButton, HapticButtonConfig, HapticStyle};

/// Button radius as a fraction of the page width.
const RADIUS_RATIO: f32 = 0.25;

#[derive(Debug)]
pub struct Tancho {
    core: PageCore,
    buttons: ButtonGroup,
    button: Option<HapticButton>,
}

impl Tancho {
    pub fn new() -> Self {
        Self {
            core: PageCore::new("Tancho"),
            buttons: ButtonGroup::new(),
            button: None,
        }
    }

    pub fn button(&self) -> Option<&HapticButton> {
        self.button.as_ref()
    }
}

impl Default for Tancho {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for Tancho {
    fn core(&self) -> &PageCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PageCore {
        &mut self.core
    }

    fn build_content(&mut self, _ctx: &mut PageContext<'_>) {
        let config = HapticButtonConfig::default()
            .with_radius(self.core.page_size().width * RADIUS_RATIO)
            .with_style(HapticStyle::Rattle);
        let center = self.core.center();
        self.button = Some(HapticButton::build(
            &mut self.core.root,
            &mut self.buttons,
            "tancho_button",
            center,
            config,
        ));
    }

    fn update(&mut self, timestep: f32, ctx: &mut PageContext<'_>) {
        let pointer = ctx.pointer_scene();
        if let Some(button) = &mut self.button {
            button.update(timestep, pointer, &mut self.core.root, &ctx.feedback.haptics);
        }
    }

    fn set_active(&mut self, active: bool, _ctx: &mut PageContext<'_>) {
        self.core.set_active(active);
        if let Some(button) = &mut self.button {
            button.set_active(active, &mut self.core.root);
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
        let Some(button) = &mut self.button else {
            return;
        };
        for change in self.buttons.dispatch(&self.core.root, event) {
            if change.down {
                log::debug!("tancho pressed");
                button.press(
                    ctx.to_scene(event.screen),
                    &mut self.core.root,
                    &ctx.feedback.haptics,
                );
            } else {
                button.release(&mut self.core.root);
            }
            self.core.set_interacting(change.down);
        }
    }
}
