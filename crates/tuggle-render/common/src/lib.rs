//! Common rendering contracts shared between renderer backends.

use tuggle_ui::DisplayList;
use tuggle_ui_graphics::Size;

/// Abstraction implemented by concrete renderer backends.
pub trait Renderer {
    type Error;

    /// Replaces the retained frame content with `list`.
    fn rebuild_scene(&mut self, list: &DisplayList) -> Result<(), Self::Error>;

    /// Draw a development overlay (e.g., FPS counter) on top of the scene.
    ///
    /// Default implementation does nothing.
    fn draw_dev_overlay(&mut self, _text: &str, _viewport: Size) {}
}

/// Renderer that keeps the last display list without drawing it.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    last: Option<DisplayList>,
    frames: u64,
    overlay: Option<String>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&DisplayList> {
        self.last.as_ref()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn overlay(&self) -> Option<&str> {
        self.overlay.as_deref()
    }
}

impl Renderer for HeadlessRenderer {
    type Error = ();

    fn rebuild_scene(&mut self, list: &DisplayList) -> Result<(), Self::Error> {
        self.last = Some(list.clone());
        self.frames += 1;
        Ok(())
    }

    fn draw_dev_overlay(&mut self, text: &str, _viewport: Size) {
        self.overlay = Some(text.to_owned());
    }
}
