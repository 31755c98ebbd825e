use super::*;
use web_time::Duration;

#[test]
fn empty_tracker_returns_zero() {
    assert_eq!(VelocityTracker1D::new().calculate_velocity(), 0.0);
}

#[test]
fn single_point_returns_zero() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 100.0);
    assert_eq!(tracker.calculate_velocity(), 0.0);
}

#[test]
fn constant_motion_reports_its_speed() {
    let mut tracker = VelocityTracker1D::new();
    // 100 units per 10ms
    for step in 0..4 {
        tracker.add_data_point(step * 10, step as f32 * 100.0);
    }
    let velocity = tracker.calculate_velocity();
    assert!((velocity - 10_000.0).abs() < 1_000.0, "got {velocity}");
}

#[test]
fn backwards_motion_is_negative() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 300.0);
    tracker.add_data_point(10, 200.0);
    tracker.add_data_point(20, 100.0);
    assert!(tracker.calculate_velocity() < 0.0);
}

#[test]
fn velocity_is_capped_both_ways() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 0.0);
    tracker.add_data_point(1, 10_000.0);
    assert_eq!(tracker.calculate_velocity_with_max(8_000.0), 8_000.0);

    tracker.reset();
    tracker.add_data_point(0, 10_000.0);
    tracker.add_data_point(1, 0.0);
    assert_eq!(tracker.calculate_velocity_with_max(8_000.0), -8_000.0);
}

#[test]
fn pause_longer_than_stop_gap_reads_as_stopped() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 0.0);
    tracker.add_data_point(ASSUME_STOPPED_MS + 1, 100.0);
    assert_eq!(tracker.calculate_velocity(), 0.0);
}

#[test]
fn samples_beyond_horizon_are_ignored() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 0.0);
    tracker.add_data_point(150, 100.0);
    tracker.add_data_point(160, 200.0);
    tracker.add_data_point(170, 300.0);
    let velocity = tracker.calculate_velocity();
    assert!((velocity - 10_000.0).abs() < 1_000.0, "got {velocity}");
}

#[test]
fn pointer_tracker_measures_from_first_sample() {
    let start = Instant::now();
    let mut tracker = PointerVelocityTracker::new();
    for step in 0..5u64 {
        tracker.add(
            start + Duration::from_millis(step * 10),
            Point::new(step as f32 * 10.0, 0.0),
        );
    }
    let velocity = tracker.velocity(8_000.0);
    assert!((velocity.x - 1_000.0).abs() < 100.0, "got {velocity:?}");
    assert_eq!(velocity.y, 0.0);

    tracker.reset();
    assert_eq!(tracker.velocity(8_000.0), Point::ZERO);
}
