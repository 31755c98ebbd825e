//! A knob that runs around a ring, clicking once per notch.

use std::f32::consts::{FRAC_PI_2, TAU};

use tuggle_ui::prelude::*;

use super::{disc, rgb, ring, Palette};

pub const TICKS: usize = 24;
const RADIANS_PER_TICK: f32 = TAU / TICKS as f32;
const RING_RATIO: f32 = 0.28;
const TRACK_RATIO: f32 = 0.04;
const KNOB_RATIO: f32 = 0.07;
const START_ANGLE: f32 = FRAC_PI_2;

const TRACK: Palette = Palette::new(rgb(80, 80, 100), rgb(80, 80, 100), rgb(60, 60, 70));
const KNOB: Palette = Palette::new(rgb(180, 140, 255), rgb(220, 180, 255), rgb(140, 130, 160));

/// Notch index of `angle`, counting counter-clockwise from the +x axis.
pub fn tick_index(angle: f32) -> usize {
    ((angle.rem_euclid(TAU) / RADIANS_PER_TICK) as usize) % TICKS
}

#[derive(Debug)]
pub struct Fellowship {
    core: PageCore,
    buttons: ButtonGroup,
    track: Option<NodeId>,
    knob: Option<NodeId>,
    ring_radius: f32,
    angle: f32,
    last_tick: usize,
    dragging: bool,
}

impl Fellowship {
    pub fn new() -> Self {
        Self {
            core: PageCore::new("Fellowship"),
            buttons: ButtonGroup::new(),
            track: None,
            knob: None,
            ring_radius: 0.0,
            angle: START_ANGLE,
            last_tick: tick_index(START_ANGLE),
            dragging: false,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Knob centre in page-local coordinates.
    pub fn knob_position(&self) -> Point {
        let (sin, cos) = self.angle.sin_cos();
        self.core.center() + Point::new(cos, sin) * self.ring_radius
    }

    fn place_knob(&mut self) {
        let position = self.knob_position();
        if let Some(node) = self.knob.and_then(|id| self.core.root.child_mut(id)) {
            node.position = position;
        }
    }

    fn recolor(&mut self) {
        let active = self.core.is_active();
        let pressed = self.dragging;
        if let Some(node) = self.track.and_then(|id| self.core.root.child_mut(id)) {
            node.color = TRACK.resolve(active, false);
        }
        if let Some(node) = self.knob.and_then(|id| self.core.root.child_mut(id)) {
            node.color = KNOB.resolve(active, pressed);
        }
    }

    fn release(&mut self) {
        self.dragging = false;
        self.core.set_interacting(false);
    }
}

impl Default for Fellowship {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for Fellowship {
    fn core(&self) -> &PageCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PageCore {
        &mut self.core
    }

    fn build_content(&mut self, _ctx: &mut PageContext<'_>) {
        let width = self.core.page_size().width;
        let center = self.core.center();
        self.ring_radius = width * RING_RATIO;
        let half_track = width * TRACK_RATIO / 2.0;
        self.track = Some(self.core.root.add_child(
            ring(
                self.ring_radius - half_track,
                self.ring_radius + half_track,
                TRACK.normal,
            )
            .with_name("fellowship_track")
            .with_position(center),
        ));
        let knob = self
            .core
            .root
            .add_child(disc(width * KNOB_RATIO, KNOB.normal).with_name("fellowship_knob"));
        self.buttons.add("fellowship_knob", &[knob], HitShape::Circle);
        self.knob = Some(knob);
        self.angle = START_ANGLE;
        self.last_tick = tick_index(START_ANGLE);
        self.place_knob();
    }

    fn update(&mut self, _timestep: f32, ctx: &mut PageContext<'_>) {
        if !self.core.is_active() {
            return;
        }
        if self.buttons.is_down(0) {
            self.dragging = true;
            self.core.set_interacting(true);
        }
        if !self.dragging {
            return;
        }
        let to_pointer = self.core.to_local(ctx.pointer_scene()) - self.core.center();
        if to_pointer.is_zero() {
            return;
        }
        let angle = to_pointer.y.atan2(to_pointer.x);
        let tick = tick_index(angle);
        if tick != self.last_tick {
            ctx.feedback.haptics.heavy();
            self.last_tick = tick;
        }
        self.angle = angle;
        self.place_knob();
    }

    fn set_active(&mut self, active: bool, _ctx: &mut PageContext<'_>) {
        self.core.set_active(active);
        if !active {
            self.release();
        }
        self.recolor();
    }

    fn activate_inputs(&mut self) {
        self.buttons.activate();
    }

    fn deactivate_inputs(&mut self) {
        self.buttons.deactivate();
        self.release();
    }

    fn pointer_event(&mut self, event: &PagePointerEvent, ctx: &mut PageContext<'_>) {
        if !self.core.is_active() {
            return;
        }
        for change in self.buttons.dispatch(&self.core.root, event) {
            if change.down {
                self.dragging = true;
                self.core.set_interacting(true);
                ctx.feedback.haptics.heavy();
            } else {
                self.release();
            }
        }
        self.recolor();
    }
}
