//! The frame loop shared by every Tuggle host.
//!
//! [`AppShell`] owns the gesture normalizer, the carousel and the feedback
//! collaborators, and runs them in a fixed per-frame order:
//!
//! 1. the normalizer drains pending pointer events and returns a snapshot,
//! 2. the events the normalizer accepted are routed to the pages' controls,
//! 3. the carousel (and through it every page) updates against the snapshot,
//! 4. one-shot gesture flags are cleared.
//!
//! Hosts feed device events through [`AppShell::pointer_event`] and call
//! [`AppShell::tick`] and [`AppShell::render`] once per display frame.

mod fps_monitor;

pub use fps_monitor::{current_fps, fps_display, fps_display_detailed, fps_stats, FpsStats};

use std::fmt::Debug;
use std::rc::Rc;

use tuggle_feedback::Feedback;
use tuggle_foundation::{
    Clock, Duration, GestureConfig, GestureNormalizer, GestureSnapshot, Instant, PointerEvent,
};
use tuggle_render_common::Renderer;
use tuggle_ui::{Carousel, CarouselConfig, Page, PageContext};
use tuggle_ui_graphics::{Color, Size};

/// Height of the scene in scene units, independent of the display.
pub const SCENE_HEIGHT: f32 = 1024.0;

/// Longest frame delta fed to the simulation, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.1;

pub const BACKGROUND: Color = Color::from_rgb_u8(40, 40, 40);

const FPS_LOG_INTERVAL: Duration = Duration::from_secs(5);

/// Display and simulation parameters for one shell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShellSettings {
    /// Logical size of the display surface in input-device units.
    pub display_size: Size,
    pub scene_height: f32,
    pub background: Color,
    pub max_frame_delta: f32,
    pub gesture: GestureConfig,
    pub carousel: CarouselConfig,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            display_size: Size::new(480.0, 854.0),
            scene_height: SCENE_HEIGHT,
            background: BACKGROUND,
            max_frame_delta: MAX_FRAME_DELTA,
            gesture: GestureConfig::default(),
            carousel: CarouselConfig::default(),
        }
    }
}

impl ShellSettings {
    pub fn with_display_size(mut self, size: Size) -> Self {
        self.display_size = size;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    pub fn with_carousel(mut self, carousel: CarouselConfig) -> Self {
        self.carousel = carousel;
        self
    }

    pub fn with_max_frame_delta(mut self, max: f32) -> Self {
        self.max_frame_delta = max;
        self
    }

    /// Scene units per display unit.
    pub fn screen_to_scene(&self) -> f32 {
        if self.display_size.height > 0.0 {
            self.scene_height / self.display_size.height
        } else {
            1.0
        }
    }

    /// The scene area one page covers.
    pub fn page_size(&self) -> Size {
        self.display_size.scaled(self.screen_to_scene())
    }
}

/// Development options for debugging and performance monitoring.
///
/// These are rendered directly by the renderer, outside the scene.
#[derive(Clone, Debug, Default)]
pub struct DevOptions {
    /// Show FPS counter overlay
    pub fps_counter: bool,
}

pub struct AppShell<R>
where
    R: Renderer,
{
    renderer: R,
    settings: ShellSettings,
    clock: Rc<dyn Clock>,
    normalizer: GestureNormalizer,
    carousel: Carousel,
    feedback: Feedback,
    snapshot: GestureSnapshot,
    last_frame: Option<Instant>,
    last_fps_log: Instant,
    frame_count: u64,
    dev_options: DevOptions,
    shut_down: bool,
}

impl<R> AppShell<R>
where
    R: Renderer,
    R::Error: Debug,
{
    /// Builds the carousel over `pages`, starts the normalizer and attaches
    /// page inputs.
    pub fn new(
        renderer: R,
        settings: ShellSettings,
        pages: Vec<Box<dyn Page>>,
        mut feedback: Feedback,
        clock: Rc<dyn Clock>,
    ) -> Self {
        fps_monitor::init_fps_tracker();

        let mut normalizer = GestureNormalizer::new(settings.gesture, clock.clone());
        normalizer.start();

        let scale = settings.screen_to_scene();
        let config = settings.carousel.with_screen_to_scene_scale(scale);
        let snapshot = *normalizer.snapshot();
        let mut carousel = {
            let mut ctx =
                PageContext::new(&snapshot, &mut feedback, scale, settings.scene_height);
            Carousel::new(config, settings.page_size(), pages, &mut ctx)
        };
        carousel.activate_inputs();

        log::info!(
            "shell ready: display {}x{}, scene scale {:.3}",
            settings.display_size.width,
            settings.display_size.height,
            scale
        );

        let now = clock.now();
        Self {
            renderer,
            settings,
            clock,
            normalizer,
            carousel,
            feedback,
            snapshot,
            last_frame: None,
            last_fps_log: now,
            frame_count: 0,
            dev_options: DevOptions::default(),
            shut_down: false,
        }
    }

    pub fn set_dev_options(&mut self, options: DevOptions) {
        self.dev_options = options;
    }

    pub fn dev_options(&self) -> &DevOptions {
        &self.dev_options
    }

    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    pub fn renderer(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut Feedback {
        &mut self.feedback
    }

    pub fn normalizer(&self) -> &GestureNormalizer {
        &self.normalizer
    }

    /// The snapshot the most recent frame ran against.
    pub fn last_snapshot(&self) -> &GestureSnapshot {
        &self.snapshot
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Queues a device event for the next frame.
    pub fn pointer_event(&mut self, event: PointerEvent) {
        if self.shut_down || event.source != self.settings.gesture.source {
            return;
        }
        self.normalizer.on_pointer_event(event);
    }

    /// Ends any gesture in progress, e.g. when the window loses focus. The
    /// cancel goes to the tracked pointer, so touch ids are honoured.
    pub fn cancel_gesture(&mut self) {
        if self.shut_down {
            return;
        }
        self.normalizer.cancel();
    }

    /// Runs one frame with the delta measured on the shell's clock.
    /// Returns the delta used.
    pub fn tick(&mut self) -> f32 {
        let now = self.clock.now();
        let dt = self
            .last_frame
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        self.update(dt)
    }

    /// Runs one frame with an explicit delta, capped at the configured
    /// maximum. Returns the delta used.
    pub fn update(&mut self, dt: f32) -> f32 {
        if self.shut_down {
            return 0.0;
        }
        let dt = dt.clamp(0.0, self.settings.max_frame_delta);
        let snapshot = self.normalizer.update(dt);
        {
            let mut ctx = PageContext::new(
                &snapshot,
                &mut self.feedback,
                self.settings.screen_to_scene(),
                self.settings.scene_height,
            );
            // Only the tracked pointer reaches the pages, so a second finger
            // cannot grab a control while the first one drags.
            for event in self.normalizer.accepted_events() {
                self.carousel.dispatch_pointer(event, &mut ctx);
            }
            self.carousel.update(dt, &mut ctx);
        }
        self.normalizer.clear_interaction_flags();
        self.snapshot = snapshot;
        self.frame_count += 1;
        dt
    }

    pub fn scroll_to_page(&mut self, index: isize, animated: bool) {
        if self.shut_down {
            return;
        }
        let snapshot = *self.normalizer.snapshot();
        let mut ctx = PageContext::new(
            &snapshot,
            &mut self.feedback,
            self.settings.screen_to_scene(),
            self.settings.scene_height,
        );
        self.carousel.scroll_to_page(index, animated, &mut ctx);
    }

    /// Flattens the carousel and hands it to the renderer.
    pub fn render(&mut self) -> Result<(), R::Error> {
        let list = self.carousel.display_list(self.settings.background);
        self.renderer.rebuild_scene(&list)?;
        fps_monitor::record_frame();
        if self.dev_options.fps_counter {
            let text = fps_display();
            self.renderer
                .draw_dev_overlay(&text, self.carousel.page_size());
        }

        let now = self.clock.now();
        if now.saturating_duration_since(self.last_fps_log) >= FPS_LOG_INTERVAL {
            log::debug!("{}", fps_display_detailed());
            self.last_fps_log = now;
        }
        Ok(())
    }
}

impl<R> AppShell<R>
where
    R: Renderer,
{
    /// Disposes the carousel and stops input. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        let snapshot = *self.normalizer.snapshot();
        {
            let mut ctx = PageContext::new(
                &snapshot,
                &mut self.feedback,
                self.settings.screen_to_scene(),
                self.settings.scene_height,
            );
            self.carousel.dispose(&mut ctx);
        }
        self.feedback.audio.stop_all();
        self.normalizer.stop();
        self.shut_down = true;
        log::info!("shell shut down after {} frames", self.frame_count);
    }
}

impl<R> Drop for AppShell<R>
where
    R: Renderer,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "tests/app_shell_tests.rs"]
mod tests;
