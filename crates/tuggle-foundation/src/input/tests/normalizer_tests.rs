use super::*;
use crate::clock::ManualClock;

struct Harness {
    clock: ManualClock,
    normalizer: GestureNormalizer,
}

impl Harness {
    fn new() -> Self {
        let clock = ManualClock::new();
        let mut normalizer = GestureNormalizer::new(GestureConfig::default(), Rc::new(clock.clone()));
        assert!(normalizer.start());
        Self { clock, normalizer }
    }

    fn send(&mut self, kind: PointerEventKind, x: f32, y: f32) {
        let event = PointerEvent::mouse(kind, Point::new(x, y), self.clock.now());
        self.normalizer.on_pointer_event(event);
    }

    fn frame(&mut self) -> GestureSnapshot {
        let snapshot = self.normalizer.update(1.0 / 60.0);
        self.normalizer.clear_interaction_flags();
        snapshot
    }

    fn tap(&mut self, x: f32, y: f32) {
        self.send(PointerEventKind::Down, x, y);
        self.clock.advance_millis(50);
        self.send(PointerEventKind::Up, x, y);
    }
}

#[test]
fn start_and_stop_are_idempotent() {
    let mut harness = Harness::new();
    assert!(!harness.normalizer.start());
    harness.normalizer.stop();
    harness.normalizer.stop();
    assert!(!harness.normalizer.is_active());
    assert!(harness.normalizer.start());
}

#[test]
fn events_stay_invisible_until_update() {
    let mut harness = Harness::new();
    harness.send(PointerEventKind::Down, 10.0, 10.0);
    assert!(!harness.normalizer.is_pointer_down());

    let snapshot = harness.normalizer.update(0.016);
    assert!(snapshot.is_pointer_down());
    assert_eq!(snapshot.start_position, Point::new(10.0, 10.0));
}

#[test]
fn events_while_stopped_are_dropped() {
    let mut harness = Harness::new();
    harness.normalizer.stop();
    harness.send(PointerEventKind::Down, 10.0, 10.0);
    harness.normalizer.start();
    assert!(!harness.frame().is_pointer_down());
}

#[test]
fn quick_release_in_place_is_a_tap() {
    let mut harness = Harness::new();
    harness.tap(20.0, 20.0);
    let snapshot = harness.frame();
    assert!(snapshot.tapped);
    assert!(!snapshot.drag_started);
    assert!(!snapshot.swipe_detected);
    assert_eq!(snapshot.phase, GesturePhase::Idle);
}

#[test]
fn clearing_resets_every_one_shot() {
    let mut harness = Harness::new();
    harness.send(PointerEventKind::Down, 0.0, 0.0);
    harness.clock.advance_millis(16);
    harness.send(PointerEventKind::Move, 100.0, 0.0);
    harness.clock.advance_millis(16);
    harness.send(PointerEventKind::Up, 120.0, 0.0);

    let snapshot = harness.normalizer.update(0.016);
    assert!(snapshot.drag_started && snapshot.drag_ended && snapshot.swipe_detected);
    assert!(!snapshot.swipe_velocity.is_zero());

    harness.normalizer.clear_interaction_flags();
    let cleared = *harness.normalizer.snapshot();
    assert!(!cleared.tapped);
    assert!(!cleared.double_tapped);
    assert!(!cleared.drag_started);
    assert!(!cleared.drag_ended);
    assert!(!cleared.tap_held);
    assert!(!cleared.swipe_detected);
    assert_eq!(cleared.swipe_velocity, Point::ZERO);
}

#[test]
fn second_press_within_window_is_double_tap() {
    let mut harness = Harness::new();
    harness.tap(0.0, 0.0);
    harness.frame();

    harness.clock.advance_millis(399);
    harness.send(PointerEventKind::Down, 0.0, 0.0);
    assert!(harness.frame().double_tapped);
}

#[test]
fn second_press_after_window_is_not_double_tap() {
    let mut harness = Harness::new();
    harness.tap(0.0, 0.0);
    harness.frame();

    harness.clock.advance_millis(401);
    harness.send(PointerEventKind::Down, 0.0, 0.0);
    assert!(!harness.frame().double_tapped);
}

#[test]
fn first_press_is_never_a_double_tap() {
    let mut harness = Harness::new();
    harness.send(PointerEventKind::Down, 0.0, 0.0);
    assert!(!harness.frame().double_tapped);
}

#[test]
fn drag_starts_once_past_threshold() {
    let mut harness = Harness::new();
    harness.send(PointerEventKind::Down, 0.0, 0.0);
    harness.send(PointerEventKind::Move, 1.5, 0.0);
    let snapshot = harness.frame();
    assert_eq!(snapshot.phase, GesturePhase::Pressed);
    assert!(!snapshot.drag_started);

    harness.send(PointerEventKind::Move, 3.0, 0.0);
    let snapshot = harness.frame();
    assert!(snapshot.drag_started);
    assert!(snapshot.is_dragging());

    harness.send(PointerEventKind::Move, 30.0, 0.0);
    let snapshot = harness.frame();
    assert!(!snapshot.drag_started, "drag_started fires on the transition frame only");
    assert!(snapshot.is_dragging());
}

#[test]
fn drag_end_fires_once_on_release() {
    let mut harness = Harness::new();
    harness.send(PointerEventKind::Down, 0.0, 0.0);
    harness.send(PointerEventKind::Move, 10.0, 0.0);
    harness.frame();
    harness.clock.advance_millis(600);
    harness.send(PointerEventKind::Up, 10.0, 0.0);

    let snapshot = harness.frame();
    assert!(snapshot.drag_ended);
    assert!(!snapshot.tapped);
    assert!(!snapshot.swipe_detected);
    assert!(!harness.frame().drag_ended);
}

#[test]
fn hold_fires_once_per_press() {
    let mut harness = Harness::new();
    harness.send(PointerEventKind::Down, 5.0, 5.0);
    assert!(!harness.frame().tap_held);

    harness.clock.advance_millis(500);
    assert!(harness.frame().tap_held);

    harness.clock.advance_millis(100);
    assert!(!harness.frame().tap_held);

    harness.send(PointerEventKind::Up, 5.0, 5.0);
    let snapshot = harness.frame();
    assert!(!snapshot.tapped, "a held press does not also tap");
}

#[test]
fn hold_is_not_reported_while_dragging() {
    let mut harness = Harness::new();
    harness.send(PointerEventKind::Down, 0.0, 0.0);
    harness.send(PointerEventKind::Move, 20.0, 0.0);
    harness.frame();
    harness.clock.advance_millis(800);
    assert!(!harness.frame().tap_held);
}

#[test]
fn fast_release_reports_swipe_velocity() {
    let mut harness = Harness::new();
    harness.send(PointerEventKind::Down, 300.0, 100.0);
    harness.clock.advance_millis(100);
    harness.send(PointerEventKind::Move, 200.0, 100.0);
    harness.clock.advance_millis(100);
    harness.send(PointerEventKind::Up, 200.0, 100.0);

    let snapshot = harness.frame();
    assert!(snapshot.swipe_detected);
    assert!((snapshot.swipe_velocity.x + 500.0).abs() < 1.0);
    assert_eq!(snapshot.swipe_velocity.y, 0.0);
}

#[test]
fn slow_release_is_not_a_swipe() {
    let mut harness = Harness::new();
    harness.send(PointerEventKind::Down, 0.0, 0.0);
    harness.clock.advance_millis(301);
    harness.send(PointerEventKind::Up, 100.0, 0.0);
    let snapshot = harness.frame();
    assert!(!snapshot.swipe_detected);
    assert_eq!(snapshot.swipe_velocity, Point::ZERO);
}

#[test]
fn zero_elapsed_swipe_skips_velocity() {
    let mut harness = Harness::new();
    harness.send(PointerEventKind::Down, 0.0, 0.0);
    harness.send(PointerEventKind::Up, 80.0, 0.0);
    let snapshot = harness.frame();
    assert!(snapshot.swipe_detected);
    assert_eq!(snapshot.swipe_velocity, Point::ZERO);
}

#[test]
fn cancel_ends_drag_without_tap_or_swipe() {
    let mut harness = Harness::new();
    harness.send(PointerEventKind::Down, 0.0, 0.0);
    harness.send(PointerEventKind::Move, 80.0, 0.0);
    harness.send(PointerEventKind::Cancel, 80.0, 0.0);
    let snapshot = harness.frame();
    assert!(snapshot.drag_ended);
    assert!(!snapshot.swipe_detected);
    assert!(!snapshot.tapped);
    assert_eq!(snapshot.phase, GesturePhase::Idle);
}

#[test]
fn previous_position_tracks_movement_then_settles() {
    let mut harness = Harness::new();
    harness.send(PointerEventKind::Down, 0.0, 0.0);
    harness.frame();
    harness.send(PointerEventKind::Move, 10.0, 0.0);
    harness.send(PointerEventKind::Move, 25.0, 0.0);
    let snapshot = harness.frame();
    assert_eq!(snapshot.previous_position, Point::new(10.0, 0.0));
    assert_eq!(snapshot.delta(), Point::new(15.0, 0.0));

    let still = harness.frame();
    assert_eq!(still.previous_position, still.position);
}

#[test]
fn other_device_family_is_ignored() {
    let mut harness = Harness::new();
    let touch = PointerEvent::touch(1, PointerEventKind::Down, Point::new(1.0, 1.0), harness.clock.now());
    harness.normalizer.on_pointer_event(touch);
    assert!(!harness.frame().is_pointer_down());
}

#[test]
fn touch_tracks_only_first_finger() {
    let clock = ManualClock::new();
    let config = GestureConfig::default().with_source(PointerSource::Touch);
    let mut normalizer = GestureNormalizer::new(config, Rc::new(clock.clone()));
    normalizer.start();

    let now = clock.now();
    normalizer.on_pointer_event(PointerEvent::touch(7, PointerEventKind::Down, Point::new(0.0, 0.0), now));
    normalizer.on_pointer_event(PointerEvent::touch(8, PointerEventKind::Down, Point::new(50.0, 0.0), now));
    normalizer.on_pointer_event(PointerEvent::touch(8, PointerEventKind::Up, Point::new(50.0, 0.0), now));
    let snapshot = normalizer.update(0.016);
    assert!(snapshot.is_pointer_down());
    assert_eq!(snapshot.start_position, Point::ZERO);

    normalizer.on_pointer_event(PointerEvent::touch(7, PointerEventKind::Up, Point::new(0.0, 0.0), now));
    assert!(!normalizer.update(0.016).is_pointer_down());
}

fn touch_normalizer(clock: &ManualClock) -> GestureNormalizer {
    let config = GestureConfig::default().with_source(PointerSource::Touch);
    let mut normalizer = GestureNormalizer::new(config, Rc::new(clock.clone()));
    normalizer.start();
    normalizer
}

#[test]
fn second_finger_events_are_not_accepted() {
    let clock = ManualClock::new();
    let mut normalizer = touch_normalizer(&clock);
    let now = clock.now();
    normalizer.on_pointer_event(PointerEvent::touch(7, PointerEventKind::Down, Point::new(0.0, 0.0), now));
    normalizer.on_pointer_event(PointerEvent::touch(8, PointerEventKind::Down, Point::new(50.0, 0.0), now));
    normalizer.on_pointer_event(PointerEvent::touch(8, PointerEventKind::Move, Point::new(60.0, 0.0), now));
    normalizer.on_pointer_event(PointerEvent::touch(7, PointerEventKind::Move, Point::new(1.0, 0.0), now));
    normalizer.on_pointer_event(PointerEvent::touch(8, PointerEventKind::Up, Point::new(60.0, 0.0), now));
    normalizer.update(0.016);

    let ids: Vec<_> = normalizer.accepted_events().iter().map(|event| (event.id, event.kind)).collect();
    assert_eq!(ids, vec![(7, PointerEventKind::Down), (7, PointerEventKind::Move)]);
    assert_eq!(normalizer.tracked_pointer(), Some(7));

    normalizer.update(0.016);
    assert!(normalizer.accepted_events().is_empty(), "reset every update");
}

#[test]
fn hover_moves_are_accepted_without_a_press() {
    let mut harness = Harness::new();
    harness.send(PointerEventKind::Move, 5.0, 5.0);
    let snapshot = harness.frame();
    assert!(!snapshot.is_pointer_down());
    assert_eq!(harness.normalizer.accepted_events().len(), 1);
}

#[test]
fn cancel_releases_the_tracked_finger() {
    let clock = ManualClock::new();
    let mut normalizer = touch_normalizer(&clock);
    let now = clock.now();
    normalizer.on_pointer_event(PointerEvent::touch(3, PointerEventKind::Down, Point::new(300.0, 500.0), now));
    normalizer.on_pointer_event(PointerEvent::touch(3, PointerEventKind::Move, Point::new(200.0, 500.0), now));
    assert!(normalizer.update(0.016).is_dragging());
    normalizer.clear_interaction_flags();

    assert!(normalizer.cancel());
    let snapshot = normalizer.update(0.016);
    assert!(!snapshot.is_pointer_down());
    assert!(snapshot.drag_ended);
    assert!(!snapshot.swipe_detected);
    assert_eq!(normalizer.tracked_pointer(), None);
    let cancel = normalizer.accepted_events()[0];
    assert_eq!((cancel.id, cancel.kind), (3, PointerEventKind::Cancel));
    assert_eq!(cancel.position, Point::new(200.0, 500.0));
    normalizer.clear_interaction_flags();

    normalizer.on_pointer_event(PointerEvent::touch(4, PointerEventKind::Down, Point::new(10.0, 10.0), now));
    assert!(normalizer.update(0.016).is_pointer_down(), "a new finger is accepted");
    assert_eq!(normalizer.tracked_pointer(), Some(4));
}

#[test]
fn cancel_covers_a_press_still_queued() {
    let clock = ManualClock::new();
    let mut normalizer = touch_normalizer(&clock);
    let now = clock.now();
    normalizer.on_pointer_event(PointerEvent::touch(9, PointerEventKind::Down, Point::new(20.0, 20.0), now));
    normalizer.on_pointer_event(PointerEvent::touch(9, PointerEventKind::Move, Point::new(25.0, 20.0), now));
    assert!(normalizer.cancel());

    let snapshot = normalizer.update(0.016);
    assert!(!snapshot.is_pointer_down());
    assert!(!snapshot.tapped);
    assert_eq!(normalizer.tracked_pointer(), None);
}

#[test]
fn cancel_without_a_press_does_nothing() {
    let mut harness = Harness::new();
    assert!(!harness.normalizer.cancel());
    harness.tap(10.0, 10.0);
    assert!(!harness.normalizer.cancel(), "queued press already released");
    assert!(harness.frame().tapped);
}

#[test]
fn clear_resets_everything() {
    let mut harness = Harness::new();
    harness.send(PointerEventKind::Down, 10.0, 10.0);
    harness.frame();
    harness.send(PointerEventKind::Move, 40.0, 10.0);
    harness.normalizer.clear();
    assert_eq!(*harness.normalizer.snapshot(), GestureSnapshot::default());
    assert_eq!(harness.frame(), GestureSnapshot::default());
}
