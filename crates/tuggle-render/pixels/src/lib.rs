mod draw;
pub mod scene;

use tuggle_render_common::Renderer;
use tuggle_ui::DisplayList;
use tuggle_ui_graphics::Size;

pub use draw::draw_scene;
pub use scene::{FrameTriangle, Scene};

#[derive(Debug)]
pub enum PixelsRendererError {
    /// The display list has a zero-area viewport.
    EmptyViewport(Size),
}

impl std::fmt::Display for PixelsRendererError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelsRendererError::EmptyViewport(size) => {
                write!(f, "cannot render into a {}x{} viewport", size.width, size.height)
            }
        }
    }
}

impl std::error::Error for PixelsRendererError {}

pub struct PixelsRenderer {
    scene: Scene,
}

impl Default for PixelsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelsRenderer {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Rasterizes the retained scene into an RGBA frame of `width`x`height`.
    pub fn draw(&self, frame: &mut [u8], width: u32, height: u32) {
        draw::draw_scene(frame, width, height, &self.scene);
    }
}

impl Renderer for PixelsRenderer {
    type Error = PixelsRendererError;

    fn rebuild_scene(&mut self, list: &DisplayList) -> Result<(), Self::Error> {
        if list.viewport.width <= 0.0 || list.viewport.height <= 0.0 {
            return Err(PixelsRendererError::EmptyViewport(list.viewport));
        }
        self.scene.rebuild(list);
        Ok(())
    }
}
