use super::*;
use std::rc::Rc;
use tuggle_feedback::{HapticEvent, HapticPreset, RecordingHaptics};
use tuggle_ui_graphics::Size;

const DT: f32 = 0.016;

struct Fixture {
    root: SceneNode,
    buttons: ButtonGroup,
    button: HapticButton,
    recorder: RecordingHaptics,
    haptics: Haptics,
}

fn fixture(config: HapticButtonConfig) -> Fixture {
    let mut root = SceneNode::container(Size::new(400.0, 800.0));
    let mut buttons = ButtonGroup::new();
    let button = HapticButton::build(
        &mut root,
        &mut buttons,
        "button",
        Point::new(200.0, 400.0),
        config,
    );
    let recorder = RecordingHaptics::new();
    let haptics = Haptics::new(Rc::new(recorder.clone()));
    Fixture {
        root,
        buttons,
        button,
        recorder,
        haptics,
    }
}

impl Fixture {
    fn press_at(&mut self, pointer: Point) {
        self.button.press(pointer, &mut self.root, &self.haptics);
    }

    fn step(&mut self, pointer: Point) {
        self.button.update(DT, pointer, &mut self.root, &self.haptics);
    }

    fn node(&self) -> &SceneNode {
        &self.root[self.button.node()]
    }
}

#[test]
fn build_registers_a_circular_button() {
    let f = fixture(HapticButtonConfig::default());
    assert_eq!(f.buttons.len(), 1);
    assert_eq!(f.button.button_index(), 0);
    assert_eq!(f.node().position, Point::new(200.0, 400.0));
    assert_eq!(f.node().color, f.button.config().palette.normal);
}

#[test]
fn press_pulse_follows_the_style() {
    let expectations = [
        (HapticStyle::Rattle, HapticEvent::Preset(HapticPreset::Medium)),
        (HapticStyle::Buzz, HapticEvent::Preset(HapticPreset::Light)),
        (HapticStyle::Tick, HapticEvent::Preset(HapticPreset::Heavy)),
        (HapticStyle::Thump, HapticEvent::Preset(HapticPreset::Heavy)),
        (
            HapticStyle::Tap,
            HapticEvent::Tap {
                intensity: 0.8,
                sharpness: 0.5,
            },
        ),
        (
            HapticStyle::BuzzPulse,
            HapticEvent::Buzz {
                intensity: 0.7,
                sharpness: 0.3,
                duration: 0.15,
            },
        ),
        (HapticStyle::Selection, HapticEvent::Preset(HapticPreset::Selection)),
    ];
    for (style, expected) in expectations {
        let mut f = fixture(HapticButtonConfig::default().with_style(style));
        f.press_at(Point::new(200.0, 400.0));
        assert_eq!(f.recorder.events(), vec![expected], "{style:?}");
    }
}

#[test]
fn drag_is_damped_and_clamped_to_max_travel() {
    let mut f = fixture(HapticButtonConfig::default());
    f.press_at(Point::new(200.0, 400.0));

    f.step(Point::new(205.0, 400.0));
    let first = f.button.drag_offset().x;
    assert!(first > 0.0 && first < 5.0, "spring should resist: {first}");

    for x in 1..20 {
        f.step(Point::new(205.0 + x as f32 * 20.0, 400.0));
    }
    let travel = f.button.drag_offset().length();
    assert!((travel - 12.0).abs() < 1e-3, "clamped to max drag: {travel}");
    assert!((f.node().position.x - 212.0).abs() < 1e-3);
}

#[test]
fn release_snaps_home_and_scale_recovers() {
    let mut f = fixture(HapticButtonConfig::default());
    f.press_at(Point::new(200.0, 400.0));
    for _ in 0..10 {
        f.step(Point::new(230.0, 380.0));
    }
    assert!((f.button.scale() - 0.85).abs() < 0.01);
    assert_eq!(f.node().color, f.button.config().palette.pressed);

    f.button.release(&mut f.root);
    assert_eq!(f.button.drag_offset(), Point::ZERO);
    assert_eq!(f.node().position, Point::new(200.0, 400.0));
    for _ in 0..20 {
        f.step(Point::ZERO);
    }
    assert_eq!(f.button.scale(), 1.0);
    assert_eq!(f.node().scale, 1.0);
}

#[test]
fn rattle_texture_respects_its_cooldown() {
    let mut f = fixture(HapticButtonConfig::default());
    f.press_at(Point::new(200.0, 400.0));
    f.recorder.clear();

    // 16 units per 16ms frame = 1000 units/s, full intensity.
    let mut x = 200.0;
    for _ in 0..3 {
        x += 16.0;
        f.step(Point::new(x, 400.0));
    }
    // Full intensity cooldown is 0.04, so frames two and three are gated.
    assert_eq!(f.recorder.count_transients(), 1);
}

#[test]
fn slow_motion_is_silent() {
    let mut f = fixture(HapticButtonConfig::default());
    f.press_at(Point::new(200.0, 400.0));
    f.recorder.clear();
    f.step(Point::new(200.5, 400.0));
    assert!(f.recorder.is_empty());
}

#[test]
fn tick_needs_a_fast_drag() {
    let mut f = fixture(HapticButtonConfig::default().with_style(HapticStyle::Tick));
    f.press_at(Point::new(200.0, 400.0));
    f.recorder.clear();

    f.step(Point::new(203.0, 400.0));
    assert!(f.recorder.is_empty(), "below the tick threshold");

    f.step(Point::new(220.0, 400.0));
    assert_eq!(
        f.recorder.events(),
        vec![HapticEvent::Transient {
            intensity: 0.8,
            sharpness: 0.9
        }]
    );
}

#[test]
fn inactive_color_wins_over_pressed() {
    let mut f = fixture(HapticButtonConfig::default());
    f.button.set_active(false, &mut f.root);
    assert_eq!(f.node().color, f.button.config().palette.inactive);
    f.press_at(Point::new(200.0, 400.0));
    assert_eq!(f.node().color, f.button.config().palette.inactive);
    f.button.set_active(true, &mut f.root);
    assert_eq!(f.node().color, f.button.config().palette.pressed);
}
