//! Carousel navigation: drag-to-scroll, velocity-biased snapping and
//! active-page gating.

use tuggle_animation::{AnimationSpec, Easing, SnapAnimation};
use tuggle_foundation::PointerEvent;
use tuggle_ui_graphics::{Color, Point, Size};

use super::pagination::{PaginationDots, PaginationStyle};
use crate::display_list::DisplayList;
use crate::page::{Page, PageContext, PagePointerEvent};
use crate::scene::Affine;

/// Seconds taken to settle onto a page.
pub const SNAP_DURATION: f32 = 0.3;

/// Release speed (scene units per second) above which a drag advances to
/// the next page in the direction of travel instead of the nearest one.
pub const SWIPE_VELOCITY_THRESHOLD: f32 = 500.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselConfig {
    pub snap: AnimationSpec,
    pub velocity_threshold: f32,
    /// Scene units per input-device pixel.
    pub screen_to_scene_scale: f32,
    pub pagination: PaginationStyle,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            snap: AnimationSpec::tween(SNAP_DURATION, Easing::EaseOutCubic),
            velocity_threshold: SWIPE_VELOCITY_THRESHOLD,
            screen_to_scene_scale: 1.0,
            pagination: PaginationStyle::default(),
        }
    }
}

impl CarouselConfig {
    pub fn with_screen_to_scene_scale(mut self, scale: f32) -> Self {
        self.screen_to_scene_scale = scale;
        self
    }

    pub fn with_snap(mut self, snap: AnimationSpec) -> Self {
        self.snap = snap;
        self
    }

    pub fn with_velocity_threshold(mut self, threshold: f32) -> Self {
        self.velocity_threshold = threshold;
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationStyle) -> Self {
        self.pagination = pagination;
        self
    }
}

/// The carousel's motion state. Dragging and snapping are exclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CarouselMode {
    Idle,
    Dragging {
        scroll_at_start: f32,
        /// Pointer x at drag start, in scene units.
        pointer_start_x: f32,
    },
    Snapping(SnapAnimation),
}

pub struct Carousel {
    config: CarouselConfig,
    page_size: Size,
    pages: Vec<Box<dyn Page>>,
    scroll_position: f32,
    active_page: usize,
    mode: CarouselMode,
    pagination: PaginationDots,
    inputs_active: bool,
    disposed: bool,
}

impl Carousel {
    /// Initializes every page eagerly, lays them out left to right and
    /// activates the first one.
    pub fn new(
        config: CarouselConfig,
        page_size: Size,
        mut pages: Vec<Box<dyn Page>>,
        ctx: &mut PageContext<'_>,
    ) -> Self {
        for (index, page) in pages.iter_mut().enumerate() {
            page.init(index, page_size, ctx);
        }
        for (index, page) in pages.iter_mut().enumerate() {
            page.set_active(index == 0, ctx);
        }
        let pagination = PaginationDots::new(pages.len(), page_size, config.pagination);
        let mut carousel = Self {
            config,
            page_size,
            pages,
            scroll_position: 0.0,
            active_page: 0,
            mode: CarouselMode::Idle,
            pagination,
            inputs_active: false,
            disposed: false,
        };
        carousel.layout_pages();
        log::info!(
            "carousel built with {} pages of {}x{}",
            carousel.pages.len(),
            page_size.width,
            page_size.height
        );
        carousel
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Box<dyn Page>] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&dyn Page> {
        self.pages.get(index).map(|page| page.as_ref())
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut (dyn Page + 'static)> {
        self.pages.get_mut(index).map(|page| page.as_mut())
    }

    pub fn active_page(&self) -> Option<&dyn Page> {
        self.page(self.active_page)
    }

    pub fn scroll_position(&self) -> f32 {
        self.scroll_position
    }

    pub fn active_page_index(&self) -> usize {
        self.active_page
    }

    pub fn mode(&self) -> CarouselMode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, CarouselMode::Dragging { .. })
    }

    pub fn is_snapping(&self) -> bool {
        matches!(self.mode, CarouselMode::Snapping(_))
    }

    /// Target of the in-flight snap, in scroll units.
    pub fn snap_target(&self) -> Option<f32> {
        match self.mode {
            CarouselMode::Snapping(snap) => Some(snap.target()),
            _ => None,
        }
    }

    pub fn pagination(&self) -> &PaginationDots {
        &self.pagination
    }

    pub fn max_scroll(&self) -> f32 {
        self.page_size.width * self.pages.len().saturating_sub(1) as f32
    }

    /// Scroll position as a fractional page index.
    pub fn fractional_page(&self) -> f32 {
        if self.page_size.width > 0.0 {
            self.scroll_position / self.page_size.width
        } else {
            0.0
        }
    }

    /// Page to settle on for a release velocity `velocity` in scene units
    /// per second (positive means the content moves toward the next page).
    pub fn calculate_snap_target(&self, velocity: f32) -> usize {
        let fractional = self.fractional_page();
        let target = if velocity.abs() > self.config.velocity_threshold {
            if velocity > 0.0 {
                fractional.ceil()
            } else {
                fractional.floor()
            }
        } else {
            fractional.round()
        };
        self.clamp_index(target)
    }

    /// Advances one frame. `ctx.input` must be the snapshot produced by this
    /// frame's normalizer update.
    pub fn update(&mut self, dt: f32, ctx: &mut PageContext<'_>) {
        let input = *ctx.input;
        let interacting = self.active_page().is_some_and(|page| page.is_interacting());

        // A drag that starts while one is still running is a re-grab within
        // one frame: anchor to the new press.
        if input.drag_started && !interacting {
            if self.is_dragging() {
                log::trace!("re-grab, re-anchoring drag at {}", self.scroll_position);
            }
            self.mode = CarouselMode::Dragging {
                scroll_at_start: self.scroll_position,
                pointer_start_x: ctx.to_scene(input.start_position).x,
            };
        }

        if let CarouselMode::Dragging {
            scroll_at_start,
            pointer_start_x,
        } = self.mode
        {
            if interacting {
                log::debug!("page {} took the pointer, abandoning drag", self.active_page);
                self.start_snap(self.calculate_snap_target(0.0));
            } else if input.is_dragging() {
                let pointer_x = ctx.to_scene(input.position).x;
                self.scroll_position = (scroll_at_start + (pointer_start_x - pointer_x))
                    .clamp(0.0, self.max_scroll());
                self.update_active_page(ctx);
            } else if input.drag_ended {
                let velocity = -input.swipe_velocity.x * self.config.screen_to_scene_scale;
                self.start_snap(self.calculate_snap_target(velocity));
            } else {
                // The pointer went away without a release (normalizer reset).
                self.start_snap(self.calculate_snap_target(0.0));
            }
        }

        if let CarouselMode::Snapping(snap) = &mut self.mode {
            self.scroll_position = snap.advance(dt);
            if snap.is_finished() {
                self.mode = CarouselMode::Idle;
            }
            self.update_active_page(ctx);
        }

        self.layout_pages();
        for page in &mut self.pages {
            page.update(dt, ctx);
        }
    }

    /// Moves to `index`, clamped into the valid page range.
    pub fn scroll_to_page(&mut self, index: isize, animated: bool, ctx: &mut PageContext<'_>) {
        let target = self.clamp_index(index as f32);
        if animated {
            self.start_snap(target);
        } else {
            self.scroll_position = target as f32 * self.page_size.width;
            self.mode = CarouselMode::Idle;
            self.update_active_page(ctx);
            self.layout_pages();
        }
    }

    /// Routes a device-space pointer event to every page in its local
    /// coordinates.
    pub fn dispatch_pointer(&mut self, event: &PointerEvent, ctx: &mut PageContext<'_>) {
        if !self.inputs_active {
            return;
        }
        let scene = ctx.to_scene(event.position);
        for page in &mut self.pages {
            let routed = PagePointerEvent {
                kind: event.kind,
                position: page.core().to_local(scene),
                screen: event.position,
                timestamp: event.timestamp,
            };
            page.pointer_event(&routed, ctx);
        }
    }

    pub fn activate_inputs(&mut self) {
        if self.inputs_active || self.disposed {
            return;
        }
        for page in &mut self.pages {
            page.activate_inputs();
        }
        self.inputs_active = true;
    }

    pub fn deactivate_inputs(&mut self) {
        if !self.inputs_active {
            return;
        }
        for page in &mut self.pages {
            page.deactivate_inputs();
        }
        self.inputs_active = false;
    }

    pub fn inputs_active(&self) -> bool {
        self.inputs_active
    }

    /// Tears down every page. Safe to call more than once.
    pub fn dispose(&mut self, ctx: &mut PageContext<'_>) {
        if self.disposed {
            return;
        }
        self.deactivate_inputs();
        for page in &mut self.pages {
            page.dispose(ctx);
        }
        self.pages.clear();
        self.mode = CarouselMode::Idle;
        self.disposed = true;
        log::info!("carousel disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Pages (culled to the viewport) followed by the pagination dots.
    pub fn display_list(&self, clear_color: Color) -> DisplayList {
        let mut list = DisplayList::new(clear_color, self.page_size);
        for page in &self.pages {
            let x = page.root().position.x;
            if x + self.page_size.width <= 0.0 || x >= self.page_size.width {
                continue;
            }
            list.push_node(page.root(), Affine::IDENTITY);
        }
        list.push_node(self.pagination.node(), Affine::IDENTITY);
        list
    }

    fn clamp_index(&self, index: f32) -> usize {
        let last = self.pages.len().saturating_sub(1) as f32;
        if index.is_nan() {
            return 0;
        }
        index.clamp(0.0, last) as usize
    }

    fn start_snap(&mut self, page: usize) {
        let target = page as f32 * self.page_size.width;
        log::debug!("snapping from {:.1} to page {page}", self.scroll_position);
        self.mode = CarouselMode::Snapping(SnapAnimation::new(
            self.scroll_position,
            target,
            self.config.snap,
        ));
    }

    fn update_active_page(&mut self, ctx: &mut PageContext<'_>) {
        if self.pages.is_empty() {
            return;
        }
        let index = self.clamp_index(self.fractional_page().round());
        if index == self.active_page {
            return;
        }
        if let Some(previous) = self.pages.get_mut(self.active_page) {
            previous.set_active(false, ctx);
        }
        self.pages[index].set_active(true, ctx);
        log::debug!("active page {} -> {index}", self.active_page);
        self.active_page = index;
        self.pagination.set_active(index);
        ctx.feedback.haptics.medium();
    }

    fn layout_pages(&mut self) {
        for (i, page) in self.pages.iter_mut().enumerate() {
            page.core_mut().root.position =
                Point::new(i as f32 * self.page_size.width - self.scroll_position, 0.0);
        }
    }
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("pages", &self.pages.len())
            .field("scroll_position", &self.scroll_position)
            .field("active_page", &self.active_page)
            .field("mode", &self.mode)
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/carousel_tests.rs"]
mod tests;
