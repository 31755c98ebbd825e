//! The page lifecycle contract.
//!
//! Every carousel slot is a [`Page`]. Pages embed a [`PageCore`] holding the
//! state the carousel relies on (identity, root node, active and
//! interacting flags) and implement the variant-specific capabilities.

use tuggle_feedback::Feedback;
use tuggle_foundation::{GestureSnapshot, Instant, PointerEventKind};
use tuggle_ui_graphics::{Point, Size};

use crate::scene::SceneNode;

/// Per-call access to the frame's input and the feedback collaborators.
pub struct PageContext<'a> {
    pub input: &'a GestureSnapshot,
    pub feedback: &'a mut Feedback,
    /// Scene units per input-device pixel.
    pub screen_to_scene: f32,
    /// Scene height, used to flip the y axis of device coordinates.
    pub scene_height: f32,
}

impl<'a> PageContext<'a> {
    pub fn new(
        input: &'a GestureSnapshot,
        feedback: &'a mut Feedback,
        screen_to_scene: f32,
        scene_height: f32,
    ) -> Self {
        Self {
            input,
            feedback,
            screen_to_scene,
            scene_height,
        }
    }

    /// Converts a device position (y down) into scene coordinates (y up).
    pub fn to_scene(&self, screen: Point) -> Point {
        Point::new(
            screen.x * self.screen_to_scene,
            self.scene_height - screen.y * self.screen_to_scene,
        )
    }

    /// The pointer position this frame, in scene coordinates.
    pub fn pointer_scene(&self) -> Point {
        self.to_scene(self.input.position)
    }

    /// Pointer velocity this frame in scene units per second (y up).
    pub fn pointer_velocity_scene(&self) -> Point {
        let v = self.input.pointer_velocity;
        Point::new(v.x * self.screen_to_scene, -v.y * self.screen_to_scene)
    }
}

/// A pointer event routed to one page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagePointerEvent {
    pub kind: PointerEventKind,
    /// Page-local scene coordinates.
    pub position: Point,
    /// Original device coordinates.
    pub screen: Point,
    pub timestamp: Instant,
}

/// State shared by every page variant.
#[derive(Debug)]
pub struct PageCore {
    title: &'static str,
    index: usize,
    name: String,
    page_size: Size,
    initialized: bool,
    active: bool,
    interacting: bool,
    pub root: SceneNode,
}

impl PageCore {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            index: 0,
            name: String::new(),
            page_size: Size::ZERO,
            initialized: false,
            active: false,
            interacting: false,
            root: SceneNode::container(Size::ZERO),
        }
    }

    fn initialize(&mut self, index: usize, page_size: Size) {
        self.index = index;
        self.page_size = page_size;
        self.name = if self.title.is_empty() {
            format!("Page {index}")
        } else {
            self.title.to_owned()
        };
        self.root = SceneNode::container(page_size)
            .with_anchor(Point::ZERO)
            .with_name(self.name.clone());
        self.initialized = true;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    pub fn center(&self) -> Point {
        self.page_size.center()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    pub fn set_interacting(&mut self, interacting: bool) {
        self.interacting = interacting;
    }

    /// Scene coordinates to this page's local coordinates.
    pub fn to_local(&self, scene: Point) -> Point {
        scene - self.root.position
    }
}

/// A carousel page (toy).
pub trait Page {
    fn core(&self) -> &PageCore;

    fn core_mut(&mut self) -> &mut PageCore;

    /// Populates `core().root`. Called exactly once, from [`init`](Self::init).
    /// Pages register their buttons here but do not attach them.
    fn build_content(&mut self, ctx: &mut PageContext<'_>);

    /// Called every frame for every page. Variants return early unless active.
    fn update(&mut self, _timestep: f32, _ctx: &mut PageContext<'_>) {}

    /// Variants override to recolor and reset state; they must keep
    /// `core().is_active()` in sync.
    fn set_active(&mut self, active: bool, _ctx: &mut PageContext<'_>) {
        self.core_mut().set_active(active);
    }

    fn activate_inputs(&mut self);

    fn deactivate_inputs(&mut self);

    /// Pointer events for this page's controls. Delivered to every page;
    /// variants ignore them while inactive.
    fn pointer_event(&mut self, _event: &PagePointerEvent, _ctx: &mut PageContext<'_>) {}

    /// Releases collaborator resources (players, sounds).
    fn dispose(&mut self, _ctx: &mut PageContext<'_>) {}

    /// Creates the root container and builds content. Returns `false` if
    /// the page was already initialized.
    fn init(&mut self, index: usize, page_size: Size, ctx: &mut PageContext<'_>) -> bool {
        if self.core().is_initialized() {
            log::warn!("page {} already initialized", self.core().name());
            return false;
        }
        self.core_mut().initialize(index, page_size);
        self.build_content(ctx);
        log::debug!(
            "built page {index} '{}' with {} nodes",
            self.core().name(),
            self.core().root.child_count()
        );
        true
    }

    fn index(&self) -> usize {
        self.core().index()
    }

    fn name(&self) -> &str {
        self.core().name()
    }

    fn is_active(&self) -> bool {
        self.core().is_active()
    }

    fn is_interacting(&self) -> bool {
        self.core().is_interacting()
    }

    fn root(&self) -> &SceneNode {
        &self.core().root
    }
}
