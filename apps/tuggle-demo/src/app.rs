//! The toy pages, in carousel order.

mod fellowship;
mod haptic_button;
mod karting;
mod katamari;
mod sampler;
mod snakeyes;
mod soundboard;
mod tancho;
mod throttle;

pub use fellowship::Fellowship;
pub use haptic_button::{HapticButton, HapticButtonConfig, HapticStyle};
pub use karting::Karting;
pub use katamari::Katamari;
pub use sampler::Sampler;
pub use snakeyes::SnakeEyes;
pub use soundboard::Soundboard;
pub use tancho::Tancho;
pub use throttle::{Engine, Gear, Throttle};

use tuggle_ui::{Page, Polygon, SceneNode};
use tuggle_ui_graphics::Color;

/// Segments used for every round shape.
const CIRCLE_SEGMENTS: usize = 64;

/// Every toy, in the order the carousel shows them.
pub fn pages() -> Vec<Box<dyn Page>> {
    vec![
        Box::new(Tancho::new()),
        Box::new(Sampler::new()),
        Box::new(SnakeEyes::new()),
        Box::new(Fellowship::new()),
        Box::new(Katamari::new()),
        Box::new(Karting::new()),
        Box::new(Soundboard::new()),
        Box::new(Throttle::new()),
    ]
}

/// Colours a control cycles through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub normal: Color,
    pub pressed: Color,
    pub inactive: Color,
}

impl Palette {
    pub const fn new(normal: Color, pressed: Color, inactive: Color) -> Self {
        Self {
            normal,
            pressed,
            inactive,
        }
    }

    pub fn resolve(&self, active: bool, pressed: bool) -> Color {
        match (active, pressed) {
            (false, _) => self.inactive,
            (true, true) => self.pressed,
            (true, false) => self.normal,
        }
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb_u8(r, g, b)
}

fn disc(radius: f32, color: Color) -> SceneNode {
    SceneNode::polygon(Polygon::circle(radius, CIRCLE_SEGMENTS)).with_color(color)
}

fn ring(inner: f32, outer: f32, color: Color) -> SceneNode {
    SceneNode::polygon(Polygon::ring(inner, outer, CIRCLE_SEGMENTS)).with_color(color)
}

fn bar(width: f32, height: f32, color: Color) -> SceneNode {
    SceneNode::polygon(Polygon::rect(width, height)).with_color(color)
}

/// Wraps an angle into `(-PI, PI]`.
fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

#[cfg(test)]
#[path = "tests/pages_tests.rs"]
mod tests;
