/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// `1 - (1 - t)^3`, used to settle the carousel onto a page.
    #[default]
    EaseOutCubic,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction.clamp(0.0, 1.0),
            Easing::EaseOutCubic => ease_out_cubic(fraction),
        }
    }
}

/// Closed form `1 - (1 - t)^3`, clamped to the unit interval.
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Moves `current` a `fraction` of the way to `target`, landing on `target`
/// once within `epsilon`. Called every frame this gives the exponential
/// settle used for press and toggle scales.
pub fn approach(current: f32, target: f32, fraction: f32, epsilon: f32) -> f32 {
    if (current - target).abs() > epsilon {
        current.lerp(&target, fraction.clamp(0.0, 1.0))
    } else {
        target
    }
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in seconds.
    pub duration: f32,
    /// Easing function to apply.
    pub easing: Easing,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration: f32, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Create a linear tween animation.
    pub fn linear(duration: f32) -> Self {
        Self::tween(duration, Easing::LinearEasing)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(0.3, Easing::EaseOutCubic)
    }
}

/// Progress-driven interpolation between two scroll positions.
///
/// `progress` advances by `dt / duration` each frame and the position is
/// `start + (target - start) * easing(progress)`. Once progress reaches 1 the
/// animation reports the exact target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnimation {
    start: f32,
    target: f32,
    progress: f32,
    spec: AnimationSpec,
}

impl SnapAnimation {
    pub fn new(start: f32, target: f32, spec: AnimationSpec) -> Self {
        Self {
            start,
            target,
            progress: 0.0,
            spec,
        }
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Advance by `dt` seconds and return the new position.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.spec.duration <= 0.0 {
            self.progress = 1.0;
        } else {
            self.progress = (self.progress + dt.max(0.0) / self.spec.duration).min(1.0);
        }
        self.value()
    }

    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.target;
        }
        let eased = self.spec.easing.transform(self.progress);
        self.start.lerp(&self.target, eased)
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
