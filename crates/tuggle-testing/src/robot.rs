use std::rc::Rc;

use tuggle_app_shell::{AppShell, ShellSettings};
use tuggle_feedback::{
    Acceleration, AudioController, Feedback, HapticPreset, Haptics, RecordingHaptics, SharedTilt,
    SilentAudio,
};
use tuggle_foundation::{Clock, ManualClock, PointerEvent, PointerEventKind};
use tuggle_render_common::HeadlessRenderer;
use tuggle_ui::{Carousel, DisplayList, Page};
use tuggle_ui_graphics::{Point, Size};

/// Display used by [`RobotTestRule::launch`]: scene and display units match.
pub const ROBOT_DISPLAY: Size = Size::new(400.0, 1024.0);

/// Simulated frame length.
pub const FRAME_MILLIS: u64 = 16;

/// Frames after which [`RobotTestRule::settle`] gives up.
const SETTLE_LIMIT: usize = 240;

/// Headless harness driving an app shell with scripted pointer input.
///
/// Every input helper queues its event at the current manual-clock time and
/// then runs one frame, the way a display-synced host would.
pub struct RobotTestRule {
    shell: AppShell<HeadlessRenderer>,
    clock: ManualClock,
    haptics: RecordingHaptics,
    tilt: Option<SharedTilt>,
    cursor: Point,
}

impl RobotTestRule {
    /// Launch `pages` with a simulated accelerometer.
    pub fn launch(pages: Vec<Box<dyn Page>>) -> Self {
        Self::launch_with(
            ShellSettings::default().with_display_size(ROBOT_DISPLAY),
            pages,
            true,
        )
    }

    /// Launch `pages` on a device without an accelerometer.
    pub fn launch_without_sensors(pages: Vec<Box<dyn Page>>) -> Self {
        Self::launch_with(
            ShellSettings::default().with_display_size(ROBOT_DISPLAY),
            pages,
            false,
        )
    }

    pub fn launch_with(
        settings: ShellSettings,
        pages: Vec<Box<dyn Page>>,
        accelerometer: bool,
    ) -> Self {
        let clock = ManualClock::new();
        let shared: Rc<dyn Clock> = Rc::new(clock.clone());
        let haptics = RecordingHaptics::new();
        let mut feedback = Feedback::new(
            Haptics::new(Rc::new(haptics.clone())),
            AudioController::new(Box::new(SilentAudio::new(shared.clone()))),
        );
        let tilt = accelerometer.then(SharedTilt::new);
        if let Some(tilt) = &tilt {
            feedback = feedback.with_accelerometer(Box::new(tilt.clone()));
        }
        let shell = AppShell::new(HeadlessRenderer::new(), settings, pages, feedback, shared);
        Self {
            shell,
            clock,
            haptics,
            tilt,
            cursor: Point::ZERO,
        }
    }

    pub fn shell(&self) -> &AppShell<HeadlessRenderer> {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut AppShell<HeadlessRenderer> {
        &mut self.shell
    }

    pub fn carousel(&self) -> &Carousel {
        self.shell.carousel()
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn haptics(&self) -> &RecordingHaptics {
        &self.haptics
    }

    pub fn feedback_mut(&mut self) -> &mut Feedback {
        self.shell.feedback_mut()
    }

    /// Tilts the simulated device. No-op without an accelerometer.
    pub fn set_tilt(&self, acceleration: Acceleration) {
        if let Some(tilt) = &self.tilt {
            tilt.set(acceleration);
        }
    }

    pub fn active_page(&self) -> usize {
        self.carousel().active_page_index()
    }

    pub fn scroll_position(&self) -> f32 {
        self.carousel().scroll_position()
    }

    /// Converts page-local scene coordinates of the active page into
    /// display coordinates, for aiming at controls.
    pub fn screen_point(&self, local: Point) -> Point {
        let settings = self.shell.settings();
        let scale = settings.screen_to_scene();
        let root_x = self
            .carousel()
            .active_page()
            .map(|page| page.root().position.x)
            .unwrap_or(0.0);
        Point::new(
            (local.x + root_x) / scale,
            (settings.scene_height - local.y) / scale,
        )
    }

    fn send(&mut self, kind: PointerEventKind, at: Point) {
        self.cursor = at;
        let mut event = PointerEvent::new(kind, at, self.clock.now());
        event.source = self.shell.settings().gesture.source;
        self.shell.pointer_event(event);
    }

    /// Advances the clock by one frame and runs it.
    pub fn advance_frame(&mut self) {
        self.clock.advance_millis(FRAME_MILLIS);
        self.shell.tick();
    }

    pub fn advance_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Runs frames until at least `millis` of simulated time have passed.
    pub fn advance_time(&mut self, millis: u64) {
        let frames = millis.div_ceil(FRAME_MILLIS);
        self.advance_frames(frames as usize);
    }

    /// Runs frames until the carousel is neither dragging nor snapping.
    pub fn settle(&mut self) {
        for _ in 0..SETTLE_LIMIT {
            if !self.carousel().is_snapping() && !self.carousel().is_dragging() {
                return;
            }
            self.advance_frame();
        }
        panic!("carousel still moving after {SETTLE_LIMIT} frames");
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.send(PointerEventKind::Down, Point::new(x, y));
        self.advance_frame();
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.send(PointerEventKind::Move, Point::new(x, y));
        self.advance_frame();
    }

    /// Releases at the last pointer position.
    pub fn release(&mut self) {
        self.send(PointerEventKind::Up, self.cursor);
        self.advance_frame();
    }

    pub fn cancel(&mut self) {
        self.send(PointerEventKind::Cancel, self.cursor);
        self.advance_frame();
    }

    pub fn tap(&mut self, x: f32, y: f32) {
        self.press(x, y);
        self.release();
    }

    /// Presses, moves in `steps` frames and releases. One frame per step
    /// keeps slow drags below the swipe threshold once `steps` is large.
    pub fn drag(&mut self, from: Point, to: Point, steps: usize) {
        self.press(from.x, from.y);
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.move_to(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
        }
        self.release();
    }

    /// A quick flick over four frames.
    pub fn swipe(&mut self, from: Point, to: Point) {
        self.drag(from, to, 4);
    }

    /// A slow drag (two seconds) that never registers as a swipe.
    pub fn slow_drag(&mut self, from: Point, to: Point) {
        self.press(from.x, from.y);
        self.advance_time(400);
        self.move_to(to.x, to.y);
        self.advance_time(400);
        self.release();
    }

    /// Left swipe across the middle of the display.
    pub fn swipe_to_next_page(&mut self) {
        let size = self.shell.settings().display_size;
        let y = size.height / 2.0;
        self.swipe(Point::new(size.width * 0.8, y), Point::new(size.width * 0.2, y));
        self.settle();
    }

    pub fn swipe_to_previous_page(&mut self) {
        let size = self.shell.settings().display_size;
        let y = size.height / 2.0;
        self.swipe(Point::new(size.width * 0.2, y), Point::new(size.width * 0.8, y));
        self.settle();
    }

    /// Flattens the current frame as the renderer would see it.
    pub fn render(&mut self) -> DisplayList {
        if let Err(()) = self.shell.render() {
            panic!("headless render failed");
        }
        self.shell
            .renderer()
            .last_frame()
            .cloned()
            .unwrap_or_else(|| panic!("headless renderer kept no frame"))
    }

    pub fn assert_active_page(&self, index: usize) {
        assert_eq!(
            self.active_page(),
            index,
            "active page (scroll {})",
            self.scroll_position()
        );
        let active: Vec<usize> = self
            .carousel()
            .pages()
            .iter()
            .filter(|page| page.is_active())
            .map(|page| page.index())
            .collect();
        assert_eq!(active, vec![index], "exactly one page flagged active");
    }

    pub fn assert_resting_on(&self, index: usize) {
        self.assert_active_page(index);
        let expected = index as f32 * self.carousel().page_size().width;
        assert!(
            (self.scroll_position() - expected).abs() < 1e-3,
            "scroll {} != {}",
            self.scroll_position(),
            expected
        );
        assert!(!self.carousel().is_snapping() && !self.carousel().is_dragging());
    }

    pub fn medium_pulses(&self) -> usize {
        self.haptics.count_preset(HapticPreset::Medium)
    }
}

/// Launch `pages`, run `f` against the robot, then shut the shell down.
pub fn run_robot_test<R>(
    pages: Vec<Box<dyn Page>>,
    f: impl FnOnce(&mut RobotTestRule) -> R,
) -> R {
    let mut robot = RobotTestRule::launch(pages);
    let result = f(&mut robot);
    robot.shell_mut().shutdown();
    result
}
