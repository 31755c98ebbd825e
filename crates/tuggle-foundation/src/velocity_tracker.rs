//! Impulse-strategy velocity estimation for pointer movement.
//!
//! Velocity is derived from the kinetic energy the recent samples would
//! impart, which weights the latest motion more heavily than a plain
//! least-squares fit.

use tuggle_ui_graphics::Point;
use web_time::Instant;

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window of the newest one contribute.
const HORIZON_MS: i64 = 100;

/// A gap longer than this between samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// One-axis velocity tracker over absolute positions.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    /// Records `position` observed at `time_ms`.
    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, position });
    }

    /// Velocity in units per second, or 0 with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        // Walk backwards from the newest sample, collecting (age, position)
        // pairs until the horizon or a stop gap is reached.
        let mut window = [(0.0f32, 0.0f32); HISTORY_SIZE];
        let mut count = 0;
        let mut cursor = self.newest;
        let mut later = newest;
        while count < HISTORY_SIZE {
            let Some(sample) = self.samples[cursor] else {
                break;
            };
            let age = newest.time_ms - sample.time_ms;
            let gap = (later.time_ms - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            window[count] = (-(age as f32), sample.position);
            later = sample;
            count += 1;
            cursor = (cursor + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&window[..count]) * 1000.0
    }

    /// Velocity in units per second, clamped to `±max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }
}

/// `window` is ordered newest first as `(time_ms, position)`.
fn impulse_velocity(window: &[(f32, f32)]) -> f32 {
    let mut work = 0.0f32;
    let oldest = window.len() - 1;
    for i in (1..=oldest).rev() {
        let (t_older, p_older) = window[i];
        let (t_newer, p_newer) = window[i - 1];
        if t_older == t_newer {
            continue;
        }
        let v_curr = (p_newer - p_older) / (t_newer - t_older);
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

/// `E = ½v²` with unit mass, keeping the sign of the energy.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

/// Two-axis tracker keyed by pointer timestamps.
#[derive(Clone, Debug, Default)]
pub struct PointerVelocityTracker {
    origin: Option<Instant>,
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

impl PointerVelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, time: Instant, position: Point) {
        let origin = *self.origin.get_or_insert(time);
        let time_ms = time.saturating_duration_since(origin).as_millis() as i64;
        self.x.add_data_point(time_ms, position.x);
        self.y.add_data_point(time_ms, position.y);
    }

    pub fn velocity(&self, max_velocity: f32) -> Point {
        Point::new(
            self.x.calculate_velocity_with_max(max_velocity),
            self.y.calculate_velocity_with_max(max_velocity),
        )
    }

    pub fn reset(&mut self) {
        self.origin = None;
        self.x.reset();
        self.y.reset();
    }
}

#[cfg(test)]
#[path = "tests/velocity_tracker_tests.rs"]
mod tests;
