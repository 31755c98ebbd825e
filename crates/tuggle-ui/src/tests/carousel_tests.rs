use super::*;

use std::cell::RefCell;
use std::rc::Rc;

use tuggle_feedback::{AudioController, Feedback, HapticPreset, Haptics, RecordingHaptics, SilentAudio};
use tuggle_foundation::{GesturePhase, GestureSnapshot, Instant, ManualClock, PointerEventKind};

use crate::page::PageCore;

const PAGE: Size = Size::new(400.0, 800.0);

#[derive(Default)]
struct Probe {
    updates: usize,
    activations: Vec<bool>,
    inputs_attached: bool,
    disposed: usize,
    pointer: Vec<PagePointerEvent>,
}

struct ProbePage {
    core: PageCore,
    probe: Rc<RefCell<Probe>>,
}

impl Page for ProbePage {
    fn core(&self) -> &PageCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PageCore {
        &mut self.core
    }

    fn build_content(&mut self, _ctx: &mut PageContext<'_>) {}

    fn update(&mut self, _timestep: f32, _ctx: &mut PageContext<'_>) {
        self.probe.borrow_mut().updates += 1;
    }

    fn set_active(&mut self, active: bool, _ctx: &mut PageContext<'_>) {
        self.core.set_active(active);
        self.probe.borrow_mut().activations.push(active);
    }

    fn activate_inputs(&mut self) {
        self.probe.borrow_mut().inputs_attached = true;
    }

    fn deactivate_inputs(&mut self) {
        self.probe.borrow_mut().inputs_attached = false;
    }

    fn pointer_event(&mut self, event: &PagePointerEvent, _ctx: &mut PageContext<'_>) {
        self.probe.borrow_mut().pointer.push(*event);
    }

    fn dispose(&mut self, _ctx: &mut PageContext<'_>) {
        self.probe.borrow_mut().disposed += 1;
    }
}

struct Fixture {
    feedback: Feedback,
    haptics: RecordingHaptics,
    probes: Vec<Rc<RefCell<Probe>>>,
    carousel: Carousel,
}

impl Fixture {
    fn new(count: usize) -> Self {
        let haptics = RecordingHaptics::new();
        let clock = ManualClock::new();
        let mut feedback = Feedback::new(
            Haptics::new(Rc::new(haptics.clone())),
            AudioController::new(Box::new(SilentAudio::new(Rc::new(clock)))),
        );
        let probes: Vec<_> = (0..count).map(|_| Rc::new(RefCell::new(Probe::default()))).collect();
        let pages: Vec<Box<dyn Page>> = probes
            .iter()
            .map(|probe| {
                Box::new(ProbePage {
                    core: PageCore::new(""),
                    probe: Rc::clone(probe),
                }) as Box<dyn Page>
            })
            .collect();
        let idle = GestureSnapshot::default();
        let mut ctx = PageContext::new(&idle, &mut feedback, 1.0, PAGE.height);
        let carousel = Carousel::new(CarouselConfig::default(), PAGE, pages, &mut ctx);
        Self {
            feedback,
            haptics,
            probes,
            carousel,
        }
    }

    fn frame(&mut self, input: GestureSnapshot, dt: f32) {
        let mut ctx = PageContext::new(&input, &mut self.feedback, 1.0, PAGE.height);
        self.carousel.update(dt, &mut ctx);
        assert!(
            !(self.carousel.is_dragging() && self.carousel.is_snapping()),
            "dragging and snapping at once"
        );
        let active: Vec<_> = self
            .carousel
            .pages()
            .iter()
            .filter(|page| page.is_active())
            .map(|page| page.index())
            .collect();
        assert_eq!(active, vec![self.carousel.active_page_index()]);
    }

    fn scroll_to(&mut self, index: isize, animated: bool) {
        let idle = GestureSnapshot::default();
        let mut ctx = PageContext::new(&idle, &mut self.feedback, 1.0, PAGE.height);
        self.carousel.scroll_to_page(index, animated, &mut ctx);
    }

    fn settle(&mut self) {
        for _ in 0..40 {
            self.frame(GestureSnapshot::default(), 1.0 / 60.0);
        }
    }

    fn medium_pulses(&self) -> usize {
        self.haptics.count_preset(HapticPreset::Medium)
    }
}

fn dragging(start_x: f32, x: f32, started: bool) -> GestureSnapshot {
    GestureSnapshot {
        position: Point::new(x, 400.0),
        start_position: Point::new(start_x, 400.0),
        phase: GesturePhase::Dragging,
        drag_started: started,
        ..GestureSnapshot::default()
    }
}

fn released(start_x: f32, x: f32, velocity_x: f32) -> GestureSnapshot {
    GestureSnapshot {
        position: Point::new(x, 400.0),
        start_position: Point::new(start_x, 400.0),
        drag_ended: true,
        swipe_detected: velocity_x != 0.0,
        swipe_velocity: Point::new(velocity_x, 0.0),
        ..GestureSnapshot::default()
    }
}

#[test]
fn first_page_starts_active() {
    let fixture = Fixture::new(8);
    assert_eq!(fixture.carousel.active_page_index(), 0);
    assert_eq!(fixture.carousel.scroll_position(), 0.0);
    assert!(fixture.carousel.pages()[0].is_active());
    assert!(fixture.carousel.pages()[1..].iter().all(|page| !page.is_active()));
    assert_eq!(fixture.carousel.pages()[3].name(), "Page 3");
    assert_eq!(fixture.medium_pulses(), 0);
}

#[test]
fn scroll_to_page_clamps_out_of_range_indices() {
    let mut fixture = Fixture::new(8);
    fixture.scroll_to(99, false);
    assert_eq!(fixture.carousel.active_page_index(), 7);
    assert_eq!(fixture.carousel.scroll_position(), 2800.0);

    fixture.scroll_to(-5, false);
    assert_eq!(fixture.carousel.active_page_index(), 0);
    assert_eq!(fixture.carousel.scroll_position(), 0.0);
}

#[test]
fn snap_target_rounds_without_velocity() {
    let mut fixture = Fixture::new(8);
    fixture.carousel.scroll_position = 150.0;
    assert_eq!(fixture.carousel.calculate_snap_target(0.0), 0);
    assert_eq!(fixture.carousel.calculate_snap_target(499.0), 0);
}

#[test]
fn snap_target_follows_fast_release() {
    let mut fixture = Fixture::new(8);
    fixture.carousel.scroll_position = 150.0;
    assert_eq!(fixture.carousel.calculate_snap_target(600.0), 1);
    assert_eq!(fixture.carousel.calculate_snap_target(-600.0), 0);

    fixture.carousel.scroll_position = 2800.0;
    assert_eq!(fixture.carousel.calculate_snap_target(600.0), 7);
}

#[test]
fn drag_scrolls_opposite_to_pointer_and_clamps() {
    let mut fixture = Fixture::new(8);
    fixture.frame(dragging(300.0, 298.0, true), 0.016);
    assert!(fixture.carousel.is_dragging());

    fixture.frame(dragging(300.0, 200.0, false), 0.016);
    assert_eq!(fixture.carousel.scroll_position(), 100.0);
    assert_eq!(fixture.carousel.pages()[1].root().position.x, 300.0);

    fixture.frame(dragging(300.0, 390.0, false), 0.016);
    assert_eq!(fixture.carousel.scroll_position(), 0.0);
}

#[test]
fn slow_release_snaps_back_to_nearest_page() {
    let mut fixture = Fixture::new(8);
    fixture.frame(dragging(300.0, 298.0, true), 0.016);
    fixture.frame(dragging(300.0, 150.0, false), 0.016);
    fixture.frame(released(300.0, 150.0, 0.0), 0.016);
    assert!(fixture.carousel.is_snapping());
    assert_eq!(fixture.carousel.snap_target(), Some(0.0));

    fixture.settle();
    assert!(!fixture.carousel.is_snapping());
    assert_eq!(fixture.carousel.scroll_position(), 0.0);
    assert_eq!(fixture.carousel.active_page_index(), 0);
}

#[test]
fn fast_left_swipe_advances_one_page() {
    let mut fixture = Fixture::new(8);
    fixture.frame(dragging(300.0, 298.0, true), 0.016);
    fixture.frame(dragging(300.0, 150.0, false), 0.016);
    fixture.frame(released(300.0, 150.0, -900.0), 0.016);
    assert_eq!(fixture.carousel.snap_target(), Some(400.0));

    fixture.settle();
    assert_eq!(fixture.carousel.scroll_position(), 400.0);
    assert_eq!(fixture.carousel.active_page_index(), 1);
    assert_eq!(fixture.medium_pulses(), 1);
    assert_eq!(fixture.carousel.pagination().active(), 1);
}

#[test]
fn drag_and_release_in_one_frame_still_snaps() {
    let mut fixture = Fixture::new(8);
    let mut flick = released(300.0, 200.0, -2000.0);
    flick.drag_started = true;
    fixture.frame(flick, 0.016);
    assert!(!fixture.carousel.is_dragging());
    assert!(fixture.carousel.is_snapping());
    // No drag frame moved the content, so even a fast flick settles in place.
    assert_eq!(fixture.carousel.snap_target(), Some(0.0));
}

#[test]
fn regrab_within_one_frame_anchors_to_the_new_press() {
    let mut fixture = Fixture::new(8);
    fixture.frame(dragging(300.0, 298.0, true), 0.016);
    fixture.frame(dragging(300.0, 100.0, false), 0.016);
    assert_eq!(fixture.carousel.scroll_position(), 200.0);

    // Release, press again and move past the slop, all drained in one frame.
    let mut regrab = dragging(250.0, 240.0, true);
    regrab.drag_ended = true;
    fixture.frame(regrab, 0.016);
    assert!(fixture.carousel.is_dragging());
    assert_eq!(fixture.carousel.scroll_position(), 210.0);

    fixture.frame(dragging(250.0, 150.0, false), 0.016);
    assert_eq!(fixture.carousel.scroll_position(), 300.0);
}

#[test]
fn snap_progress_is_eased_and_exact_at_end() {
    let mut fixture = Fixture::new(8);
    fixture.scroll_to(2, true);
    assert!(fixture.carousel.is_snapping());

    fixture.frame(GestureSnapshot::default(), 0.15);
    let halfway = fixture.carousel.scroll_position();
    assert!((halfway - 700.0).abs() < 0.5, "ease-out covers 87.5% at half time, got {halfway}");

    fixture.frame(GestureSnapshot::default(), 0.15);
    assert_eq!(fixture.carousel.scroll_position(), 800.0);
    assert_eq!(fixture.carousel.mode(), CarouselMode::Idle);
    assert_eq!(fixture.carousel.active_page_index(), 2);
}

#[test]
fn page_interaction_cancels_carousel_drag() {
    let mut fixture = Fixture::new(8);
    fixture.frame(dragging(300.0, 298.0, true), 0.016);
    fixture.frame(dragging(300.0, 130.0, false), 0.016);
    assert!(fixture.carousel.is_dragging());

    fixture
        .carousel
        .page_mut(0)
        .expect("page 0")
        .core_mut()
        .set_interacting(true);
    fixture.frame(dragging(300.0, 120.0, false), 0.016);

    assert!(!fixture.carousel.is_dragging());
    assert!(fixture.carousel.is_snapping());
    assert_eq!(fixture.carousel.snap_target(), Some(0.0));
}

#[test]
fn interacting_page_blocks_new_drags() {
    let mut fixture = Fixture::new(8);
    fixture
        .carousel
        .page_mut(0)
        .expect("page 0")
        .core_mut()
        .set_interacting(true);
    fixture.frame(dragging(300.0, 200.0, true), 0.016);
    assert!(!fixture.carousel.is_dragging());
    assert_eq!(fixture.carousel.scroll_position(), 0.0);
}

#[test]
fn new_drag_cancels_snap() {
    let mut fixture = Fixture::new(8);
    fixture.scroll_to(3, true);
    fixture.frame(GestureSnapshot::default(), 0.05);
    let mid = fixture.carousel.scroll_position();

    fixture.frame(dragging(200.0, 197.0, true), 0.016);
    assert!(fixture.carousel.is_dragging());
    assert!((fixture.carousel.scroll_position() - (mid + 3.0)).abs() < 1e-3);
}

#[test]
fn page_change_deactivates_previous_and_pulses() {
    let mut fixture = Fixture::new(3);
    fixture.scroll_to(1, false);

    assert_eq!(fixture.probes[0].borrow().activations, vec![true, false]);
    assert_eq!(fixture.probes[1].borrow().activations, vec![false, true]);
    assert_eq!(fixture.probes[2].borrow().activations, vec![false]);
    assert_eq!(fixture.medium_pulses(), 1);

    fixture.scroll_to(1, false);
    assert_eq!(fixture.medium_pulses(), 1);
}

#[test]
fn every_page_updates_each_frame() {
    let mut fixture = Fixture::new(4);
    fixture.frame(GestureSnapshot::default(), 0.016);
    fixture.frame(GestureSnapshot::default(), 0.016);
    assert!(fixture.probes.iter().all(|probe| probe.borrow().updates == 2));
}

#[test]
fn pointer_events_reach_pages_in_local_coordinates_once_inputs_attached() {
    let mut fixture = Fixture::new(3);
    let event = PointerEvent::mouse(PointerEventKind::Down, Point::new(100.0, 300.0), Instant::now());

    let idle = GestureSnapshot::default();
    let mut ctx = PageContext::new(&idle, &mut fixture.feedback, 1.0, PAGE.height);
    fixture.carousel.dispatch_pointer(&event, &mut ctx);
    assert!(fixture.probes[0].borrow().pointer.is_empty());

    fixture.carousel.activate_inputs();
    assert!(fixture.probes.iter().all(|probe| probe.borrow().inputs_attached));
    fixture.carousel.dispatch_pointer(&event, &mut ctx);

    assert_eq!(fixture.probes[0].borrow().pointer[0].position, Point::new(100.0, 500.0));
    assert_eq!(fixture.probes[1].borrow().pointer[0].position, Point::new(-300.0, 500.0));
}

#[test]
fn dispose_is_idempotent() {
    let mut fixture = Fixture::new(3);
    fixture.carousel.activate_inputs();
    let idle = GestureSnapshot::default();
    let mut ctx = PageContext::new(&idle, &mut fixture.feedback, 1.0, PAGE.height);
    fixture.carousel.dispose(&mut ctx);
    fixture.carousel.dispose(&mut ctx);

    assert!(fixture.carousel.is_disposed());
    assert_eq!(fixture.carousel.page_count(), 0);
    for probe in &fixture.probes {
        assert_eq!(probe.borrow().disposed, 1);
        assert!(!probe.borrow().inputs_attached);
    }
}

#[test]
fn empty_carousel_is_inert() {
    let mut fixture = Fixture::new(0);
    fixture.scroll_to(4, false);
    assert_eq!(fixture.carousel.active_page_index(), 0);
    assert_eq!(fixture.carousel.max_scroll(), 0.0);
    let idle = GestureSnapshot::default();
    let mut ctx = PageContext::new(&idle, &mut fixture.feedback, 1.0, PAGE.height);
    fixture.carousel.update(0.016, &mut ctx);
}

#[test]
fn pagination_highlights_the_active_page() {
    let mut fixture = Fixture::new(4);
    fixture.scroll_to(2, false);
    let dots = fixture.carousel.pagination();
    assert_eq!(dots.len(), 4);
    assert_eq!(dots.dot_alpha(2), Some(1.0));
    assert!((dots.dot_alpha(0).unwrap_or_default() - 100.0 / 255.0).abs() < 1e-6);
}
