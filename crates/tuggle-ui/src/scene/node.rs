use std::ops::{Index, IndexMut};

use tuggle_ui_graphics::{Color, Point, Rect, Size};

use super::polygon::Polygon;
use super::transform::Affine;

/// Handle to a direct child of a [`SceneNode`]. Stays valid until that
/// child is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Invisible grouping node with an explicit content size.
    Container { size: Size },
    Polygon(Polygon),
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub position: Point,
    pub anchor: Point,
    pub scale: f32,
    /// Counter-clockwise rotation in radians.
    pub angle: f32,
    /// Tint, multiplied into every descendant.
    pub color: Color,
    pub visible: bool,
    shape: Shape,
    children: Vec<Option<SceneNode>>,
}

impl SceneNode {
    fn with_shape(shape: Shape) -> Self {
        Self {
            name: String::new(),
            position: Point::ZERO,
            anchor: Point::new(0.5, 0.5),
            scale: 1.0,
            angle: 0.0,
            color: Color::WHITE,
            visible: true,
            shape,
            children: Vec::new(),
        }
    }

    pub fn container(size: Size) -> Self {
        Self::with_shape(Shape::Container { size })
    }

    pub fn polygon(polygon: Polygon) -> Self {
        Self::with_shape(Shape::Polygon(polygon))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_anchor(mut self, anchor: Point) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn set_polygon(&mut self, polygon: Polygon) {
        self.shape = Shape::Polygon(polygon);
    }

    /// Local-space rectangle the anchor refers to.
    pub fn content_bounds(&self) -> Rect {
        match &self.shape {
            Shape::Container { size } => Rect::from_size(*size),
            Shape::Polygon(polygon) => polygon.bounds(),
        }
    }

    pub fn content_size(&self) -> Size {
        self.content_bounds().size()
    }

    /// Maps this node's local space into its parent's space.
    pub fn local_transform(&self) -> Affine {
        let bounds = self.content_bounds();
        let pivot = Point::new(
            bounds.x + self.anchor.x * bounds.width,
            bounds.y + self.anchor.y * bounds.height,
        );
        Affine::translate(self.position)
            * Affine::rotate(self.angle)
            * Affine::scale(self.scale)
            * Affine::translate(-pivot)
    }

    pub fn add_child(&mut self, child: SceneNode) -> NodeId {
        self.children.push(Some(child));
        NodeId(self.children.len() - 1)
    }

    /// Detaches a child. Its [`NodeId`] becomes dangling and other ids are
    /// unaffected.
    pub fn remove_child(&mut self, id: NodeId) -> Option<SceneNode> {
        self.children.get_mut(id.0).and_then(Option::take)
    }

    pub fn remove_all_children(&mut self) {
        self.children.clear();
    }

    pub fn child(&self, id: NodeId) -> Option<&SceneNode> {
        self.children.get(id.0).and_then(Option::as_ref)
    }

    pub fn child_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.children.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn children(&self) -> impl Iterator<Item = &SceneNode> {
        self.children.iter().flatten()
    }

    pub fn child_count(&self) -> usize {
        self.children.iter().flatten().count()
    }

    /// Follows a chain of child ids starting at this node.
    pub fn descendant(&self, path: &[NodeId]) -> Option<&SceneNode> {
        path.iter().try_fold(self, |node, id| node.child(*id))
    }

    pub fn descendant_mut(&mut self, path: &[NodeId]) -> Option<&mut SceneNode> {
        path.iter().try_fold(self, |node, id| node.child_mut(*id))
    }

    /// Transform from the descendant at `path` into this node's local space.
    pub fn transform_to(&self, path: &[NodeId]) -> Option<Affine> {
        let mut node = self;
        let mut transform = Affine::IDENTITY;
        for id in path {
            node = node.child(*id)?;
            transform = transform * node.local_transform();
        }
        Some(transform)
    }

    /// Whether this node and every node on `path` below it is visible.
    pub fn is_visible_along(&self, path: &[NodeId]) -> bool {
        let mut node = self;
        if !node.visible {
            return false;
        }
        for id in path {
            match node.child(*id) {
                Some(child) if child.visible => node = child,
                _ => return false,
            }
        }
        true
    }
}

/// Panics if the child was removed.
impl Index<NodeId> for SceneNode {
    type Output = SceneNode;

    fn index(&self, id: NodeId) -> &SceneNode {
        match self.child(id) {
            Some(node) => node,
            None => panic!("scene node {id:?} was removed"),
        }
    }
}

impl IndexMut<NodeId> for SceneNode {
    fn index_mut(&mut self, id: NodeId) -> &mut SceneNode {
        match self.child_mut(id) {
            Some(node) => node,
            None => panic!("scene node {id:?} was removed"),
        }
    }
}

#[cfg(test)]
#[path = "../tests/scene_tests.rs"]
mod tests;
