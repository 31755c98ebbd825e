//! Flattening of scene trees into render-ready triangles.

use tuggle_ui_graphics::{Color, Point, Rect, Size};

use crate::scene::{Affine, SceneNode, Shape};

/// Solid-colored triangles in scene coordinates, three vertices each.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawTriangles {
    pub color: Color,
    pub vertices: Vec<Point>,
}

/// Everything the renderer needs for one frame, back to front.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayList {
    pub clear_color: Color,
    /// Visible scene area, origin at the bottom left.
    pub viewport: Size,
    pub items: Vec<DrawTriangles>,
}

impl DisplayList {
    pub fn new(clear_color: Color, viewport: Size) -> Self {
        Self {
            clear_color,
            viewport,
            items: Vec::new(),
        }
    }

    /// Appends `node` and its subtree drawn under `parent`.
    pub fn push_node(&mut self, node: &SceneNode, parent: Affine) {
        self.push_tinted(node, parent, Color::WHITE);
    }

    fn push_tinted(&mut self, node: &SceneNode, parent: Affine, tint: Color) {
        if !node.visible {
            return;
        }
        let transform = parent * node.local_transform();
        let color = multiply(tint, node.color);
        if let Shape::Polygon(polygon) = node.shape() {
            if color.a() > 0.0 && !polygon.is_empty() {
                let vertices = polygon
                    .triangles()
                    .flat_map(|tri| tri.map(|p| transform.apply(p)))
                    .collect();
                self.items.push(DrawTriangles { color, vertices });
            }
        }
        for child in node.children() {
            self.push_tinted(child, transform, color);
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.items.iter().map(|item| item.vertices.len() / 3).sum()
    }

    /// Scene-space bounds of everything drawn.
    pub fn bounds(&self) -> Option<Rect> {
        self.items
            .iter()
            .filter_map(|item| Rect::bounding(&item.vertices))
            .reduce(|a, b| a.union(&b))
    }
}

fn multiply(a: Color, b: Color) -> Color {
    Color(a.0 * b.0, a.1 * b.1, a.2 * b.2, a.3 * b.3)
}

#[cfg(test)]
#[path = "tests/display_list_tests.rs"]
mod tests;
