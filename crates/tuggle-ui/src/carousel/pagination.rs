use tuggle_ui_graphics::{Color, Point, Size};

use crate::scene::{NodeId, Polygon, SceneNode};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaginationStyle {
    pub radius: f32,
    pub spacing: f32,
    pub bottom_margin: f32,
    pub color: Color,
    pub active_alpha: f32,
    pub inactive_alpha: f32,
}

impl Default for PaginationStyle {
    fn default() -> Self {
        Self {
            radius: 6.0,
            spacing: 20.0,
            bottom_margin: 60.0,
            color: Color::WHITE,
            active_alpha: 1.0,
            inactive_alpha: 100.0 / 255.0,
        }
    }
}

/// One dot per page along the bottom of the screen, highlighting the
/// active page. Not scrolled with the pages.
#[derive(Debug)]
pub struct PaginationDots {
    style: PaginationStyle,
    node: SceneNode,
    dots: Vec<NodeId>,
    active: usize,
}

impl PaginationDots {
    pub fn new(page_count: usize, viewport: Size, style: PaginationStyle) -> Self {
        let mut node = SceneNode::container(viewport)
            .with_anchor(Point::ZERO)
            .with_name("pagination");
        let span = page_count.saturating_sub(1) as f32 * style.spacing;
        let start_x = (viewport.width - span) / 2.0;
        let dots = (0..page_count)
            .map(|i| {
                node.add_child(
                    SceneNode::polygon(Polygon::circle(style.radius, 24))
                        .with_position(Point::new(start_x + i as f32 * style.spacing, style.bottom_margin))
                        .with_color(style.color.with_alpha(style.inactive_alpha)),
                )
            })
            .collect();
        let mut pagination = Self {
            style,
            node,
            dots,
            active: 0,
        };
        pagination.set_active(0);
        pagination
    }

    pub fn set_active(&mut self, index: usize) {
        self.active = index;
        for (i, id) in self.dots.iter().enumerate() {
            let alpha = if i == index {
                self.style.active_alpha
            } else {
                self.style.inactive_alpha
            };
            if let Some(dot) = self.node.child_mut(*id) {
                dot.color = self.style.color.with_alpha(alpha);
            }
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    pub fn node(&self) -> &SceneNode {
        &self.node
    }

    /// Alpha of the dot for `index`, if it exists.
    pub fn dot_alpha(&self, index: usize) -> Option<f32> {
        let id = self.dots.get(index)?;
        self.node.child(*id).map(|dot| dot.color.a())
    }
}
