//! A five-speed gearbox with a throttle pedal and a rev counter.
//!
//! The engine rumbles through a continuous [`HapticPlayer`] whose intensity
//! and sharpness follow the revs and the gear. Shifting up outside the shift
//! window stalls the engine, as does letting the revs die in gear.

use std::f32::consts::{FRAC_PI_2, PI};

use tuggle_animation::Lerp;
use tuggle_feedback::{HapticPlayer, Haptics};
use tuggle_ui::prelude::*;

use super::{bar, disc, rgb};

pub const IDLE_RPM: f32 = 500.0;
/// Revs gained per second with the pedal down.
pub const RPM_ACCEL_RATE: f32 = 2500.0;
/// Revs lost per second off the pedal.
pub const RPM_DECEL_RATE: f32 = 2000.0;
/// Fraction of the redline, counted down from it, in which upshifts are
/// clean.
pub const SHIFT_WINDOW: f32 = 0.15;
/// Seconds between limiter knocks at the redline.
const LIMITER_INTERVAL: f32 = 0.08;

const GAUGE_CENTER_RATIO: f32 = 0.65;
const GAUGE_RADIUS_RATIO: f32 = 0.5;
const GAUGE_TICKS: usize = 12;
const CONTROLS_RATIO: f32 = 0.30;

const TICK_COLOR: Color = rgb(180, 180, 180);
const NEEDLE_COLOR: Color = rgb(255, 40, 40);
const HUB_COLOR: Color = rgb(50, 50, 55);
const GEAR_OFF: Color = rgb(60, 60, 70);
const GEAR_ON: Color = rgb(100, 200, 255);
const SHIFT_COLOR: Color = rgb(80, 80, 90);
const SHIFT_PRESSED: Color = rgb(100, 160, 100);
const ARROW_COLOR: Color = rgb(200, 200, 200);
const PEDAL_COLOR: Color = rgb(60, 60, 65);
const PEDAL_PRESSED: Color = rgb(80, 160, 80);
const PEDAL_GRIP: Color = rgb(40, 40, 45);
const STALL_COLOR: Color = rgb(255, 60, 60);
const SHIFT_NOW_COLOR: Color = rgb(100, 255, 100);
const INACTIVE_TINT: Color = Color::rgb(0.6, 0.6, 0.6);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Gear {
    #[default]
    Neutral,
    First,
    Second,
    Third,
    Fourth,
    Fifth,
}

/// Rumble intensity and sharpness bounds for one gear.
#[derive(Clone, Copy, Debug)]
struct Rumble {
    floor_intensity: f32,
    floor_sharpness: f32,
    intensity: (f32, f32),
    sharpness: (f32, f32),
}

impl Gear {
    /// Position on the gear bars, 0 for neutral.
    pub fn number(self) -> usize {
        match self {
            Gear::Neutral => 0,
            Gear::First => 1,
            Gear::Second => 2,
            Gear::Third => 3,
            Gear::Fourth => 4,
            Gear::Fifth => 5,
        }
    }

    pub fn redline(self) -> f32 {
        match self {
            Gear::Neutral => 3000.0,
            Gear::First => 5000.0,
            Gear::Second => 7000.0,
            Gear::Third => 10000.0,
            Gear::Fourth => 12500.0,
            Gear::Fifth => 15000.0,
        }
    }

    fn up(self) -> Option<Gear> {
        match self {
            Gear::Neutral => Some(Gear::First),
            Gear::First => Some(Gear::Second),
            Gear::Second => Some(Gear::Third),
            Gear::Third => Some(Gear::Fourth),
            Gear::Fourth => Some(Gear::Fifth),
            Gear::Fifth => None,
        }
    }

    fn down(self) -> Option<Gear> {
        match self {
            Gear::Neutral => None,
            Gear::First => Some(Gear::Neutral),
            Gear::Second => Some(Gear::First),
            Gear::Third => Some(Gear::Second),
            Gear::Fourth => Some(Gear::Third),
            Gear::Fifth => Some(Gear::Fourth),
        }
    }

    fn rumble(self) -> Rumble {
        let (floor_intensity, floor_sharpness, intensity, sharpness) = match self {
            Gear::Neutral => (0.15, 0.1, (0.3, 0.5), (0.15, 0.25)),
            Gear::First => (0.25, 0.08, (0.5, 0.85), (0.1, 0.25)),
            Gear::Second => (0.35, 0.12, (0.55, 0.9), (0.2, 0.35)),
            Gear::Third => (0.4, 0.18, (0.6, 0.95), (0.3, 0.5)),
            Gear::Fourth => (0.45, 0.25, (0.65, 1.0), (0.45, 0.7)),
            Gear::Fifth => (0.5, 0.35, (0.7, 1.0), (0.6, 0.9)),
        };
        Rumble {
            floor_intensity,
            floor_sharpness,
            intensity,
            sharpness,
        }
    }

    fn indicator_color(self) -> Color {
        match self {
            Gear::Neutral => rgb(100, 100, 100),
            Gear::First => rgb(80, 200, 100),
            Gear::Second => rgb(150, 220, 80),
            Gear::Third => rgb(220, 220, 60),
            Gear::Fourth => rgb(255, 160, 50),
            Gear::Fifth => rgb(255, 80, 80),
        }
    }
}

/// Rev and gear state of the simulated engine, plus its rumble player.
#[derive(Debug)]
pub struct Engine {
    gear: Gear,
    rpm: f32,
    throttling: bool,
    running: bool,
    stalled: bool,
    limiter_timer: f32,
    player: HapticPlayer,
}

impl Engine {
    pub fn new(player: HapticPlayer) -> Self {
        Self {
            gear: Gear::Neutral,
            rpm: 0.0,
            throttling: false,
            running: false,
            stalled: false,
            limiter_timer: 0.0,
            player,
        }
    }

    pub fn gear(&self) -> Gear {
        self.gear
    }

    pub fn rpm(&self) -> f32 {
        self.rpm
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    pub fn is_throttling(&self) -> bool {
        self.throttling
    }

    pub fn player(&self) -> &HapticPlayer {
        &self.player
    }

    /// Revs as a fraction of the current gear's redline, in `[0, 1]`.
    pub fn rpm_ratio(&self) -> f32 {
        (self.rpm / self.gear.redline()).clamp(0.0, 1.0)
    }

    pub fn in_shift_window(&self) -> bool {
        self.rpm >= self.gear.redline() * (1.0 - SHIFT_WINDOW)
    }

    /// Pedal down. Starts a stopped or stalled engine.
    pub fn press_throttle(&mut self, haptics: &Haptics) {
        let was_throttling = self.throttling;
        self.throttling = true;
        if !self.running {
            self.start(haptics);
        } else if !was_throttling {
            haptics.transient(0.6, 0.25);
        }
    }

    pub fn release_throttle(&mut self, haptics: &Haptics) {
        if self.throttling && self.running {
            haptics.transient(0.4, 0.15);
        }
        self.throttling = false;
    }

    pub fn shift_up(&mut self, haptics: &Haptics) {
        let Some(next) = self.gear.up() else {
            haptics.heavy();
            haptics.transient(0.8, 0.9);
            return;
        };
        if self.gear == Gear::Neutral {
            haptics.heavy();
            haptics.buzz(0.7, 0.2, 0.1);
            self.gear = next;
            self.update_rumble();
            return;
        }
        if !self.in_shift_window() {
            self.stall(haptics);
            return;
        }
        haptics.heavy();
        match next {
            Gear::Second => haptics.buzz(0.8, 0.25, 0.08),
            Gear::Third => haptics.transient(0.9, 0.4),
            Gear::Fourth => haptics.transient(0.95, 0.5),
            Gear::Fifth => {
                haptics.transient(1.0, 0.7);
                haptics.buzz(0.6, 0.6, 0.05);
            }
            Gear::Neutral | Gear::First => {}
        }
        self.gear = next;
        self.rpm = (next.redline() * 0.4).max(IDLE_RPM);
        self.update_rumble();
    }

    pub fn shift_down(&mut self, haptics: &Haptics) {
        match self.gear.down() {
            None => haptics.transient(0.4, 0.2),
            Some(Gear::Neutral) => {
                haptics.medium();
                haptics.transient(0.5, 0.3);
                self.gear = Gear::Neutral;
                self.update_rumble();
            }
            Some(lower) => {
                haptics.heavy();
                haptics.transient(0.85, 0.35);
                haptics.buzz(0.75, 0.3, 0.12);
                self.gear = lower;
                self.rpm = (self.rpm * 1.3).min(lower.redline() * 0.85).max(IDLE_RPM);
                self.update_rumble();
            }
        }
    }

    /// Advances the rev model by `dt` seconds.
    pub fn update(&mut self, dt: f32, haptics: &Haptics) {
        if !self.running || self.stalled {
            return;
        }
        let redline = self.gear.redline();
        if self.throttling {
            self.rpm += RPM_ACCEL_RATE * dt;
            if self.rpm >= redline {
                self.rpm = redline;
                self.limiter_timer -= dt;
                if self.limiter_timer <= 0.0 {
                    haptics.transient(0.9, 0.8);
                    self.limiter_timer = LIMITER_INTERVAL;
                }
            } else {
                self.limiter_timer = 0.0;
            }
        } else {
            self.limiter_timer = 0.0;
            self.rpm -= RPM_DECEL_RATE * dt;
            if self.gear == Gear::Neutral {
                self.rpm = self.rpm.max(IDLE_RPM);
            } else if self.rpm <= 0.0 {
                self.stall(haptics);
                return;
            }
        }
        self.update_rumble();
    }

    /// Silences the rumble while the page is off screen.
    pub fn pause(&mut self) {
        if self.running {
            self.player.pause();
        }
    }

    pub fn resume(&mut self) {
        if self.running && !self.stalled {
            self.player.play();
        }
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.rpm = 0.0;
        self.player.stop();
    }

    fn start(&mut self, haptics: &Haptics) {
        if self.running {
            return;
        }
        self.running = true;
        self.stalled = false;
        self.rpm = IDLE_RPM;
        haptics.buzz(0.6, 0.4, 0.15);
        haptics.transient(0.7, 0.3);
        haptics.buzz(0.5, 0.2, 0.1);
        self.player.set_looping(true);
        self.player.start(0.5, 0.15);
        log::debug!("engine started in {:?}", self.gear);
    }

    fn stall(&mut self, haptics: &Haptics) {
        log::debug!("engine stalled in {:?} at {:.0} rpm", self.gear, self.rpm);
        self.stalled = true;
        self.running = false;
        self.rpm = 0.0;
        self.limiter_timer = 0.0;
        self.gear = Gear::Neutral;
        self.player.stop();
        haptics.heavy();
        haptics.buzz(1.0, 0.5, 0.15);
        haptics.transient(0.9, 0.3);
        haptics.buzz(0.7, 0.2, 0.2);
    }

    fn update_rumble(&mut self) {
        if !self.running {
            return;
        }
        let ratio = self.rpm / self.gear.redline();
        let rumble = self.gear.rumble();
        let lerp = |(low, high): (f32, f32)| low.lerp(&high, ratio);
        let mut intensity = lerp(rumble.intensity).max(rumble.floor_intensity);
        let sharpness = lerp(rumble.sharpness).max(rumble.floor_sharpness);
        if self.throttling && ratio > 0.7 {
            intensity = (intensity + 0.1).min(1.0);
        }
        if ratio > 0.9 {
            intensity = 1.0;
        }
        self.player.set_intensity(intensity);
        self.player.set_sharpness(sharpness);
    }
}

const SHIFT_DOWN: usize = 0;
const SHIFT_UP: usize = 1;
const PEDAL: usize = 2;

#[derive(Debug, Default)]
struct Nodes {
    needle: Option<NodeId>,
    bars: Vec<NodeId>,
    indicator: Option<NodeId>,
    /// Shift down, shift up, pedal; same order as the buttons.
    controls: Vec<NodeId>,
}

#[derive(Debug)]
pub struct Throttle {
    core: PageCore,
    buttons: ButtonGroup,
    nodes: Nodes,
    engine: Option<Engine>,
}

impl Throttle {
    pub fn new() -> Self {
        Self {
            core: PageCore::new("Throttle"),
            buttons: ButtonGroup::new(),
            nodes: Nodes::default(),
            engine: None,
        }
    }

    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    /// Centres of the shift down, shift up and pedal controls, page-local.
    pub fn control_centers(&self) -> [Point; 3] {
        let size = self.core.page_size();
        let (cx, controls_y) = (size.width / 2.0, size.height * CONTROLS_RATIO);
        let shift_y = controls_y - size.height * 0.04 * 3.5;
        let offset = size.width * 0.25;
        [
            Point::new(cx - offset, shift_y),
            Point::new(cx + offset, shift_y),
            Point::new(cx, size.height * 0.10),
        ]
    }

    fn build_gauge(&mut self) {
        let size = self.core.page_size();
        let center = Point::new(size.width / 2.0, size.height * GAUGE_CENTER_RATIO);
        let radius = size.width * GAUGE_RADIUS_RATIO;
        let root = &mut self.core.root;
        for i in 0..GAUGE_TICKS {
            let t = i as f32 / (GAUGE_TICKS - 1) as f32;
            let angle = PI - t * PI;
            let (width, length) = if i % 2 == 0 { (4.0, 25.0) } else { (2.0, 12.0) };
            let (sin, cos) = angle.sin_cos();
            root.add_child(
                bar(width, length, TICK_COLOR)
                    .with_anchor(Point::new(0.5, 0.0))
                    .with_position(center + Point::new(cos, sin) * (radius * 0.75))
                    .with_angle(angle - FRAC_PI_2),
            );
        }
        self.nodes.needle = Some(
            root.add_child(
                bar(6.0, radius * 0.95, NEEDLE_COLOR)
                    .with_name("throttle_needle")
                    .with_anchor(Point::new(0.5, 0.08))
                    .with_position(center)
                    .with_angle(FRAC_PI_2),
            ),
        );
        root.add_child(disc(radius * 0.12, HUB_COLOR).with_position(center));
    }

    fn build_gear_controls(&mut self) {
        let size = self.core.page_size();
        let cx = size.width / 2.0;
        let controls_y = size.height * CONTROLS_RATIO;
        let bar_size = Size::new(size.width * 0.08, size.height * 0.04);
        let pitch = bar_size.width * 1.4;
        let first_x = cx - 2.0 * pitch;
        for i in 0..5 {
            let id = self.core.root.add_child(
                bar(bar_size.width, bar_size.height, GEAR_OFF).with_position(Point::new(
                    first_x + i as f32 * pitch,
                    controls_y + bar_size.height * 2.0,
                )),
            );
            self.nodes.bars.push(id);
        }
        self.nodes.indicator = Some(
            self.core.root.add_child(
                bar(size.width * 0.15, size.height * 0.06, Gear::Neutral.indicator_color())
                    .with_name("throttle_gear")
                    .with_position(Point::new(cx, controls_y - bar_size.height)),
            ),
        );

        let [down, up, _] = self.control_centers();
        let (button_w, button_h) = (size.width * 0.18, size.height * 0.08);
        let arrow = button_h * 0.35;
        for (name, center, tip) in [("throttle_shift_down", down, -1.0), ("throttle_shift_up", up, 1.0)] {
            let id = self.core.root.add_child(
                bar(button_w, button_h, SHIFT_COLOR)
                    .with_name(name)
                    .with_position(center),
            );
            self.buttons.add(name, &[id], HitShape::Bounds);
            self.nodes.controls.push(id);
            let triangle = Polygon::triangle(
                Point::new(0.0, arrow * tip),
                Point::new(-arrow * 0.7, -arrow * 0.4 * tip),
                Point::new(arrow * 0.7, -arrow * 0.4 * tip),
            );
            self.core.root.add_child(
                SceneNode::polygon(triangle)
                    .with_color(ARROW_COLOR)
                    .with_position(center),
            );
        }
    }

    fn build_pedal(&mut self) {
        let size = self.core.page_size();
        let [_, _, center] = self.control_centers();
        let (width, height) = (size.width * 0.35, size.height * 0.12);
        let id = self.core.root.add_child(
            bar(width, height, PEDAL_COLOR)
                .with_name("throttle_pedal")
                .with_position(center),
        );
        self.buttons.add("throttle_pedal", &[id], HitShape::Bounds);
        self.nodes.controls.push(id);
        let spacing = width / 6.0;
        for i in 1..=5 {
            self.core.root.add_child(
                bar(3.0, height * 0.6, PEDAL_GRIP)
                    .with_position(center + Point::new(-width / 2.0 + i as f32 * spacing, 0.0)),
            );
        }
    }

    fn refresh(&mut self) {
        let Some(engine) = &self.engine else {
            return;
        };
        let root = &mut self.core.root;
        let ratio = engine.rpm_ratio();
        if let Some(node) = self.nodes.needle.and_then(|id| root.child_mut(id)) {
            node.angle = FRAC_PI_2 - ratio * PI;
        }
        let lit = engine.gear().number();
        for (i, id) in self.nodes.bars.iter().enumerate() {
            if let Some(node) = root.child_mut(*id) {
                node.color = if i < lit { GEAR_ON } else { GEAR_OFF };
            }
        }
        if let Some(node) = self.nodes.indicator.and_then(|id| root.child_mut(id)) {
            let gear = engine.gear();
            let near_redline = ratio > 0.85 && !matches!(gear, Gear::Neutral | Gear::Fifth);
            node.scale = 1.0;
            node.color = gear.indicator_color();
            if engine.is_stalled() {
                node.color = STALL_COLOR;
            } else if near_redline {
                node.scale = 1.0 + 0.15 * (engine.rpm() * 0.05).sin();
                if engine.in_shift_window() {
                    node.color = SHIFT_NOW_COLOR;
                }
            }
        }
        for (i, id) in self.nodes.controls.iter().enumerate() {
            let (normal, pressed) = if i == PEDAL {
                (PEDAL_COLOR, PEDAL_PRESSED)
            } else {
                (SHIFT_COLOR, SHIFT_PRESSED)
            };
            if let Some(node) = root.child_mut(*id) {
                node.color = if self.buttons.is_down(i) { pressed } else { normal };
            }
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for Throttle {
    fn core(&self) -> &PageCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PageCore {
        &mut self.core
    }

    fn build_content(&mut self, ctx: &mut PageContext<'_>) {
        self.build_gauge();
        self.build_gear_controls();
        self.build_pedal();
        self.engine = Some(Engine::new(ctx.feedback.haptics.player()));
        self.refresh();
    }

    fn update(&mut self, timestep: f32, ctx: &mut PageContext<'_>) {
        if !self.core.is_active() {
            return;
        }
        if let Some(engine) = &mut self.engine {
            engine.update(timestep, &ctx.feedback.haptics);
        }
        self.refresh();
    }

    fn set_active(&mut self, active: bool, ctx: &mut PageContext<'_>) {
        self.core.set_active(active);
        self.core.root.color = if active { Color::WHITE } else { INACTIVE_TINT };
        if let Some(engine) = &mut self.engine {
            if active {
                engine.resume();
            } else {
                engine.release_throttle(&ctx.feedback.haptics);
                engine.pause();
            }
        }
        if !active {
            self.core.set_interacting(false);
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
        let Some(engine) = &mut self.engine else {
            return;
        };
        let haptics = &ctx.feedback.haptics;
        let changes = self.buttons.dispatch(&self.core.root, event);
        for change in &changes {
            match (change.index, change.down) {
                (SHIFT_DOWN, true) => engine.shift_down(haptics),
                (SHIFT_UP, true) => engine.shift_up(haptics),
                (PEDAL, true) => engine.press_throttle(haptics),
                (PEDAL, false) => engine.release_throttle(haptics),
                _ => {}
            }
        }
        self.core.set_interacting(self.buttons.any_down());
        if !changes.is_empty() {
            self.refresh();
        }
    }

    fn dispose(&mut self, _ctx: &mut PageContext<'_>) {
        if let Some(engine) = &mut self.engine {
            engine.stop();
        }
    }
}
