use super::*;

#[test]
fn manual_clock_clones_share_time() {
    let clock = ManualClock::new();
    let other = clock.clone();
    let start = clock.now();

    other.advance_millis(250);

    assert_eq!(clock.now().duration_since(start), Duration::from_millis(250));
}

#[test]
fn negative_advance_is_ignored() {
    let clock = ManualClock::new();
    let start = clock.now();
    clock.advance_secs_f32(-1.0);
    assert_eq!(clock.now(), start);
}
