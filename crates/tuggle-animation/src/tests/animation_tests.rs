use super::*;

#[test]
fn ease_out_cubic_hits_both_endpoints() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    assert_eq!(Easing::EaseOutCubic.transform(0.0), 0.0);
    assert_eq!(Easing::EaseOutCubic.transform(1.0), 1.0);
}

#[test]
fn ease_out_cubic_is_monotonic() {
    let mut previous = ease_out_cubic(0.0);
    for step in 1..=1000 {
        let value = ease_out_cubic(step as f32 / 1000.0);
        assert!(value >= previous, "decreased at step {step}");
        previous = value;
    }
}

#[test]
fn ease_out_cubic_clamps_out_of_range_input() {
    assert_eq!(ease_out_cubic(-0.5), 0.0);
    assert_eq!(ease_out_cubic(1.5), 1.0);
    assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
}

#[test]
fn linear_easing_is_the_identity_on_the_unit_interval() {
    assert_eq!(Easing::LinearEasing.transform(0.25), 0.25);
    assert_eq!(Easing::LinearEasing.transform(-1.0), 0.0);
    assert_eq!(Easing::LinearEasing.transform(2.0), 1.0);
}

#[test]
fn snap_animation_finishes_exactly_on_target() {
    let mut snap = SnapAnimation::new(150.0, 400.0, AnimationSpec::default());

    let first = snap.advance(0.1);
    assert!(first > 150.0 && first < 400.0);
    assert!(!snap.is_finished());

    snap.advance(0.1);
    let last = snap.advance(0.2);
    assert!(snap.is_finished());
    assert_eq!(last, 400.0);
    assert_eq!(snap.progress(), 1.0);
}

#[test]
fn snap_animation_follows_eased_curve() {
    let mut snap = SnapAnimation::new(0.0, 100.0, AnimationSpec::tween(0.3, Easing::EaseOutCubic));
    let value = snap.advance(0.15);
    assert!((value - 87.5).abs() < 1e-3);
}

#[test]
fn zero_duration_snap_completes_immediately() {
    let mut snap = SnapAnimation::new(10.0, 20.0, AnimationSpec::linear(0.0));
    assert_eq!(snap.advance(0.0), 20.0);
    assert!(snap.is_finished());
}

#[test]
fn approach_closes_a_fraction_of_the_gap() {
    let next = approach(1.0, 0.5, 0.25, 0.001);
    assert!((next - 0.875).abs() < 1e-6);
    assert_eq!(approach(1.0, 0.5, 4.0, 0.001), 0.5, "fraction is capped");
}

#[test]
fn approach_lands_on_target_within_epsilon() {
    assert_eq!(approach(0.8505, 0.85, 0.1, 0.001), 0.85);
    let mut value = 1.0;
    for _ in 0..200 {
        value = approach(value, 0.85, 0.5, 0.001);
    }
    assert_eq!(value, 0.85);
}

#[test]
fn f32_lerp_is_linear() {
    assert_eq!(2.0f32.lerp(&6.0, 0.25), 3.0);
    assert_eq!(2.0f32.lerp(&6.0, 1.0), 6.0);
}
