//! A ball rolling around a round arena as the device tilts.
//!
//! Rolling produces a stream of soft transients whose rate follows the ball
//! speed; hitting the wall gives a sharp knock, and sliding along it ticks.
//! Without an accelerometer the page shows a dimmed, motionless arena.

use std::f32::consts::{PI, TAU};

use tuggle_ui::prelude::*;

use super::{disc, rgb, ring, Palette};

/// Scene units per second squared at 1 g of tilt.
pub const TILT_ACCEL: f32 = 3500.0;
/// Velocity kept per 60 Hz frame.
pub const FRICTION: f32 = 0.97;
pub const BOUNCE_DAMPING: f32 = 0.65;
pub const MIN_ROLL_VELOCITY: f32 = 30.0;
pub const MAX_ROLL_VELOCITY: f32 = 1000.0;
const ROLL_INTERVAL: f32 = 0.04;
pub const MIN_COLLISION_VELOCITY: f32 = 60.0;
const WALL_TICK_ANGLE: f32 = 0.15;
const WALL_TICK_INTERVAL: f32 = 0.05;

const ARENA_RATIO: f32 = 0.38;
const BALL_RATIO: f32 = 0.06;
const BORDER: f32 = 8.0;
const WALL_GAP: f32 = 4.0;

const ARENA: Palette = Palette::new(rgb(80, 80, 100), rgb(80, 80, 100), rgb(60, 60, 70));
const BALL: Palette = Palette::new(rgb(255, 140, 60), rgb(255, 140, 60), rgb(180, 120, 80));

#[derive(Debug)]
pub struct Katamari {
    core: PageCore,
    arena: Option<NodeId>,
    border: Option<NodeId>,
    ball: Option<NodeId>,
    max_distance: f32,
    offset: Point,
    velocity: Point,
    roll_timer: f32,
    wall_timer: f32,
    last_wall_angle: f32,
    touching_wall: bool,
    has_sensor: bool,
}

impl Katamari {
    pub fn new() -> Self {
        Self {
            core: PageCore::new("Katamari"),
            arena: None,
            border: None,
            ball: None,
            max_distance: 0.0,
            offset: Point::ZERO,
            velocity: Point::ZERO,
            roll_timer: 0.0,
            wall_timer: 0.0,
            last_wall_angle: 0.0,
            touching_wall: false,
            has_sensor: false,
        }
    }

    /// Ball position relative to the arena centre.
    pub fn ball_offset(&self) -> Point {
        self.offset
    }

    pub fn ball_velocity(&self) -> Point {
        self.velocity
    }

    /// Furthest the ball centre can be from the arena centre.
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn is_degraded(&self) -> bool {
        !self.has_sensor
    }

    fn step(&mut self, dt: f32, tilt: Point, ctx: &mut PageContext<'_>) {
        self.velocity += tilt * TILT_ACCEL * dt;
        self.velocity = self.velocity * FRICTION.powf(dt * 60.0);
        self.offset += self.velocity * dt;

        let touching = self.offset.length() > self.max_distance;
        if touching {
            let normal = self.offset.normalized();
            let into_wall = self.velocity.dot(normal);
            if into_wall > 0.0 {
                if into_wall > MIN_COLLISION_VELOCITY {
                    collision_pulse(into_wall, ctx);
                }
                self.velocity -= normal * into_wall * (1.0 + BOUNCE_DAMPING);
            }
            self.offset = normal * self.max_distance;
            self.wall_tick(self.offset.y.atan2(self.offset.x), dt, ctx);
        } else if self.touching_wall {
            self.last_wall_angle = 0.0;
        }
        self.touching_wall = touching;

        let center = self.core.center();
        if let Some(node) = self.ball.and_then(|id| self.core.root.child_mut(id)) {
            node.position = center + self.offset;
        }
        self.roll(self.velocity.length(), dt, ctx);
    }

    fn roll(&mut self, speed: f32, dt: f32, ctx: &mut PageContext<'_>) {
        self.roll_timer -= dt;
        if self.roll_timer > 0.0 || speed < MIN_ROLL_VELOCITY {
            return;
        }
        let n = speed.min(MAX_ROLL_VELOCITY) / MAX_ROLL_VELOCITY;
        ctx.feedback.haptics.transient(0.3 + n * 0.7, 0.10);
        self.roll_timer = ROLL_INTERVAL * (1.0 - n * 0.7);
    }

    fn wall_tick(&mut self, angle: f32, dt: f32, ctx: &mut PageContext<'_>) {
        self.wall_timer -= dt;
        if !self.touching_wall {
            self.last_wall_angle = angle;
            return;
        }
        let mut travelled = (angle - self.last_wall_angle).abs();
        if travelled > PI {
            travelled = TAU - travelled;
        }
        if travelled >= WALL_TICK_ANGLE && self.wall_timer <= 0.0 {
            ctx.feedback.haptics.transient(0.6, 0.9);
            self.last_wall_angle = angle;
            self.wall_timer = WALL_TICK_INTERVAL;
        }
    }

    fn recolor(&mut self) {
        let lit = self.core.is_active() && self.has_sensor;
        for (id, palette) in [(self.arena, ARENA), (self.ball, BALL)] {
            if let Some(node) = id.and_then(|id| self.core.root.child_mut(id)) {
                node.color = palette.resolve(lit, false);
            }
        }
        if let Some(node) = self.border.and_then(|id| self.core.root.child_mut(id)) {
            node.color = ARENA.resolve(lit, false).darken(0.7);
        }
    }
}

fn collision_pulse(speed: f32, ctx: &mut PageContext<'_>) {
    let n = speed.min(MAX_ROLL_VELOCITY) / MAX_ROLL_VELOCITY;
    ctx.feedback.haptics.transient(0.7 + n * 0.3, 0.9);
    if n > 0.5 {
        ctx.feedback.haptics.heavy();
    }
}

impl Default for Katamari {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for Katamari {
    fn core(&self) -> &PageCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PageCore {
        &mut self.core
    }

    fn build_content(&mut self, ctx: &mut PageContext<'_>) {
        let width = self.core.page_size().width;
        let center = self.core.center();
        let arena_radius = width * ARENA_RATIO;
        let ball_radius = width * BALL_RATIO;
        self.max_distance = arena_radius - ball_radius - WALL_GAP;
        self.has_sensor = ctx.feedback.accelerometer.is_some();
        if !self.has_sensor {
            log::warn!("no accelerometer, {} is static", self.core.name());
        }

        self.arena = Some(self.core.root.add_child(
            disc(arena_radius, ARENA.normal)
                .with_name("katamari_arena")
                .with_position(center),
        ));
        self.border = Some(self.core.root.add_child(
            ring(arena_radius - BORDER, arena_radius, ARENA.normal.darken(0.7))
                .with_name("katamari_border")
                .with_position(center),
        ));
        self.ball = Some(self.core.root.add_child(
            disc(ball_radius, BALL.normal)
                .with_name("katamari_ball")
                .with_position(center),
        ));
    }

    fn update(&mut self, timestep: f32, ctx: &mut PageContext<'_>) {
        if !self.core.is_active() {
            return;
        }
        let Some(acceleration) = ctx.feedback.acceleration() else {
            return;
        };
        self.step(timestep, Point::new(acceleration.x, acceleration.y), ctx);
    }

    fn set_active(&mut self, active: bool, _ctx: &mut PageContext<'_>) {
        self.core.set_active(active);
        if active {
            self.velocity = Point::ZERO;
            self.roll_timer = 0.0;
            self.wall_timer = 0.0;
            self.touching_wall = false;
        }
        self.recolor();
    }

    fn activate_inputs(&mut self) {}

    fn deactivate_inputs(&mut self) {}
}
