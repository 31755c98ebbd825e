//! A steering wheel that turns with the device and clicks every ten degrees.

use std::f32::consts::{FRAC_PI_2, TAU};

use tuggle_ui::prelude::*;

use super::{bar, disc, rgb, ring, wrap_angle, Palette};

/// Radians per click.
pub const TICK_ANGLE: f32 = 0.175;
/// Fraction of the remaining turn covered each frame.
pub const SMOOTHING: f32 = 0.2;
/// Below this planar tilt (in g) the device is treated as flat.
const FLAT_TILT: f32 = 0.05;

const WHEEL_RATIO: f32 = 0.35;
const HUB_RATIO: f32 = 0.08;
const INDICATOR_RATIO: f32 = 0.28;
const INDICATOR_WIDTH: f32 = 8.0;
const RIM_WIDTH: f32 = 12.0;
const TICK_MARKS: usize = 12;
const TICK_MARK_SIZE: Size = Size::new(3.0, 15.0);
const TICK_MARK_GAP: f32 = 5.0;

const WHEEL: Palette = Palette::new(rgb(60, 60, 70), rgb(60, 60, 70), rgb(45, 45, 50));
const HUB: Palette = Palette::new(rgb(200, 50, 50), rgb(200, 50, 50), rgb(120, 50, 50));
const INDICATOR: Palette = Palette::new(rgb(255, 200, 50), rgb(255, 200, 50), rgb(150, 120, 40));
const TICK: Palette = Palette::new(rgb(100, 100, 110), rgb(100, 100, 110), rgb(60, 60, 65));

/// Click index for a wheel angle.
pub fn tick_index(angle: f32) -> i32 {
    (angle / TICK_ANGLE).floor() as i32
}

#[derive(Debug)]
pub struct Karting {
    core: PageCore,
    wheel: Option<NodeId>,
    hub: Option<NodeId>,
    indicator: Option<NodeId>,
    ticks: Vec<NodeId>,
    tick_distance: f32,
    angle: f32,
    last_tick: i32,
    has_sensor: bool,
}

impl Karting {
    pub fn new() -> Self {
        Self {
            core: PageCore::new("Karting"),
            wheel: None,
            hub: None,
            indicator: None,
            ticks: Vec::with_capacity(TICK_MARKS),
            tick_distance: 0.0,
            angle: 0.0,
            last_tick: 0,
            has_sensor: false,
        }
    }

    /// Current wheel rotation, counter-clockwise, in `(-PI, PI]`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn is_degraded(&self) -> bool {
        !self.has_sensor
    }

    fn turn_to(&mut self, angle: f32) {
        self.angle = angle;
        let center = self.core.center();
        for id in [self.wheel, self.indicator].into_iter().flatten() {
            if let Some(node) = self.core.root.child_mut(id) {
                node.angle = angle;
            }
        }
        for (i, id) in self.ticks.iter().enumerate() {
            let rotated = i as f32 / TICK_MARKS as f32 * TAU + angle;
            let (sin, cos) = rotated.sin_cos();
            if let Some(node) = self.core.root.child_mut(*id) {
                node.position = center + Point::new(cos, sin) * self.tick_distance;
                node.angle = rotated - FRAC_PI_2;
            }
        }
    }

    fn recolor(&mut self) {
        let lit = self.core.is_active() && self.has_sensor;
        let parts = [
            (self.wheel, WHEEL),
            (self.hub, HUB),
            (self.indicator, INDICATOR),
        ];
        for (id, palette) in parts {
            if let Some(node) = id.and_then(|id| self.core.root.child_mut(id)) {
                node.color = palette.resolve(lit, false);
            }
        }
        for id in &self.ticks {
            if let Some(node) = self.core.root.child_mut(*id) {
                node.color = TICK.resolve(lit, false);
            }
        }
    }
}

impl Default for Karting {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for Karting {
    fn core(&self) -> &PageCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PageCore {
        &mut self.core
    }

    fn build_content(&mut self, ctx: &mut PageContext<'_>) {
        let width = self.core.page_size().width;
        let center = self.core.center();
        let radius = width * WHEEL_RATIO;
        let inner = radius - RIM_WIDTH;
        self.has_sensor = ctx.feedback.accelerometer.is_some();
        if !self.has_sensor {
            log::warn!("no accelerometer, {} is static", self.core.name());
        }

        self.wheel = Some(self.core.root.add_child(
            ring(inner, radius, WHEEL.normal)
                .with_name("karting_wheel")
                .with_position(center),
        ));
        self.tick_distance = inner - TICK_MARK_SIZE.height - TICK_MARK_GAP;
        for i in 0..TICK_MARKS {
            let id = self.core.root.add_child(
                bar(TICK_MARK_SIZE.width, TICK_MARK_SIZE.height, TICK.normal)
                    .with_name(format!("karting_tick_{i}"))
                    .with_anchor(Point::new(0.5, 0.0)),
            );
            self.ticks.push(id);
        }
        self.hub = Some(self.core.root.add_child(
            disc(width * HUB_RATIO, HUB.normal)
                .with_name("karting_hub")
                .with_position(center),
        ));
        self.indicator = Some(self.core.root.add_child(
            bar(INDICATOR_WIDTH, width * INDICATOR_RATIO, INDICATOR.normal)
                .with_name("karting_indicator")
                .with_anchor(Point::new(0.5, 0.0))
                .with_position(center),
        ));
        self.last_tick = 0;
        self.turn_to(0.0);
    }

    fn update(&mut self, _timestep: f32, ctx: &mut PageContext<'_>) {
        if !self.core.is_active() {
            return;
        }
        let Some(acceleration) = ctx.feedback.acceleration() else {
            return;
        };
        if acceleration.x.hypot(acceleration.y) < FLAT_TILT {
            return;
        }
        let raw = acceleration.x.atan2(-acceleration.y);
        let smoothed = wrap_angle(self.angle + wrap_angle(raw - self.angle) * SMOOTHING);
        let tick = tick_index(smoothed);
        if tick != self.last_tick {
            ctx.feedback.haptics.transient(0.6, 0.85);
            self.last_tick = tick;
        }
        self.turn_to(smoothed);
    }

    fn set_active(&mut self, active: bool, _ctx: &mut PageContext<'_>) {
        self.core.set_active(active);
        if active {
            self.last_tick = 0;
            self.turn_to(0.0);
        }
        self.recolor();
    }

    fn activate_inputs(&mut self) {}

    fn deactivate_inputs(&mut self) {}
}
