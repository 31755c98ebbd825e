//! Display list converted into frame-normalized triangles.

use tuggle_ui::DisplayList;
use tuggle_ui_graphics::{Color, Point};

/// A triangle in normalized frame coordinates: `(0,0)` top left,
/// `(1,1)` bottom right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTriangle {
    pub vertices: [Point; 3],
    pub color: Color,
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub clear_color: Color,
    pub triangles: Vec<FrameTriangle>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            clear_color: Color::BLACK,
            triangles: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.triangles.clear();
    }

    /// Flips the scene's y-up coordinates and normalizes by the viewport.
    pub fn rebuild(&mut self, list: &DisplayList) {
        self.clear();
        self.clear_color = list.clear_color;
        let (w, h) = (list.viewport.width, list.viewport.height);
        let to_frame = |p: Point| Point::new(p.x / w, 1.0 - p.y / h);
        for item in &list.items {
            for tri in item.vertices.chunks_exact(3) {
                self.triangles.push(FrameTriangle {
                    vertices: [to_frame(tri[0]), to_frame(tri[1]), to_frame(tri[2])],
                    color: item.color,
                });
            }
        }
        log::trace!("scene rebuilt with {} triangles", self.triangles.len());
    }
}
