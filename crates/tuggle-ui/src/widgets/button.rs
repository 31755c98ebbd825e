//! Press/release buttons hit-tested against scene nodes.
//!
//! A [`ButtonGroup`] belongs to one page and is fed that page's pointer
//! events in page-local coordinates. It reports `(name, down)` transitions
//! and leaves visuals to the page.

use std::rc::Rc;

use smallvec::SmallVec;
use tuggle_foundation::PointerEventKind;
use tuggle_ui_graphics::Point;

use crate::page::PagePointerEvent;
use crate::scene::{NodeId, SceneNode, Shape};

/// Hit region, in the button node's local space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum HitShape {
    /// The node's content bounds.
    #[default]
    Bounds,
    /// Largest circle centred in the content bounds.
    Circle,
    /// The node's polygon itself; falls back to bounds for containers.
    Polygon,
}

#[derive(Clone, Debug)]
pub struct Button {
    name: Rc<str>,
    path: SmallVec<[NodeId; 2]>,
    hit: HitShape,
    listening: bool,
    down: bool,
}

impl Button {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path from the page root to the button node.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    fn hit_test(&self, root: &SceneNode, point: Point) -> bool {
        if !root.is_visible_along(&self.path) {
            return false;
        }
        let (Some(node), Some(transform)) =
            (root.descendant(&self.path), root.transform_to(&self.path))
        else {
            return false;
        };
        let Some(inverse) = transform.inverse() else {
            return false;
        };
        let local = inverse.apply(point);
        let bounds = node.content_bounds();
        match (self.hit, node.shape()) {
            (HitShape::Polygon, Shape::Polygon(polygon)) => polygon.contains(local),
            (HitShape::Circle, _) => {
                let radius = bounds.width.min(bounds.height) / 2.0;
                local.distance(bounds.center()) <= radius
            }
            _ => bounds.contains(local.x, local.y),
        }
    }
}

/// A press or release reported by a [`ButtonGroup`].
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonEvent {
    pub index: usize,
    pub name: Rc<str>,
    pub down: bool,
    /// Pointer position in page-local coordinates.
    pub position: Point,
}

#[derive(Clone, Debug, Default)]
pub struct ButtonGroup {
    buttons: Vec<Button>,
}

impl ButtonGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the node at `path` (relative to the page root) as a button.
    /// Buttons start detached; see [`activate`](Self::activate).
    pub fn add(&mut self, name: &str, path: &[NodeId], hit: HitShape) -> usize {
        self.buttons.push(Button {
            name: Rc::from(name),
            path: SmallVec::from_slice(path),
            hit,
            listening: false,
            down: false,
        });
        self.buttons.len() - 1
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Button> {
        self.buttons.iter()
    }

    pub fn is_down(&self, index: usize) -> bool {
        self.buttons.get(index).is_some_and(Button::is_down)
    }

    pub fn any_down(&self) -> bool {
        self.buttons.iter().any(Button::is_down)
    }

    /// Attaches every button's listener.
    pub fn activate(&mut self) {
        for button in &mut self.buttons {
            button.listening = true;
        }
    }

    /// Detaches every listener, silently releasing held buttons.
    pub fn deactivate(&mut self) {
        for button in &mut self.buttons {
            button.listening = false;
            button.down = false;
        }
    }

    pub fn is_active(&self) -> bool {
        self.buttons.iter().any(Button::is_listening)
    }

    /// Routes one pointer event. A press goes to the topmost (last added)
    /// listening button under the pointer; a release or cancel releases
    /// every held button wherever the pointer is.
    pub fn dispatch(
        &mut self,
        root: &SceneNode,
        event: &PagePointerEvent,
    ) -> SmallVec<[ButtonEvent; 2]> {
        let mut events = SmallVec::new();
        match event.kind {
            PointerEventKind::Down => {
                let hit = self
                    .buttons
                    .iter()
                    .rposition(|b| b.listening && !b.down && b.hit_test(root, event.position));
                if let Some(index) = hit {
                    let button = &mut self.buttons[index];
                    button.down = true;
                    events.push(ButtonEvent {
                        index,
                        name: Rc::clone(&button.name),
                        down: true,
                        position: event.position,
                    });
                }
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                for (index, button) in self.buttons.iter_mut().enumerate() {
                    if button.down {
                        button.down = false;
                        events.push(ButtonEvent {
                            index,
                            name: Rc::clone(&button.name),
                            down: false,
                            position: event.position,
                        });
                    }
                }
            }
            PointerEventKind::Move => {}
        }
        events
    }
}

#[cfg(test)]
#[path = "../tests/button_tests.rs"]
mod tests;
