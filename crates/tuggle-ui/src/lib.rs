//! Scene graph, page lifecycle contract and the swipe carousel.
//!
//! The carousel owns every page, reads one [`GestureSnapshot`] per frame and
//! turns it into drag-to-scroll and eased snap-to-page motion. Pages
//! build their visuals into a retained [`SceneNode`] tree that is flattened
//! into a [`DisplayList`] for the renderer.
//!
//! [`GestureSnapshot`]: tuggle_foundation::GestureSnapshot

pub mod carousel;
mod display_list;
mod page;
pub mod scene;
pub mod widgets;

pub use carousel::{
    Carousel, CarouselConfig, CarouselMode, PaginationDots, PaginationStyle,
    SWIPE_VELOCITY_THRESHOLD,
};
pub use display_list::{DisplayList, DrawTriangles};
pub use page::{Page, PageContext, PageCore, PagePointerEvent};
pub use scene::{Affine, NodeId, Polygon, SceneNode, Shape};
pub use widgets::{Button, ButtonEvent, ButtonGroup, HitShape};

pub mod prelude {
    pub use crate::page::{Page, PageContext, PageCore, PagePointerEvent};
    pub use crate::scene::{NodeId, Polygon, SceneNode};
    pub use crate::widgets::{ButtonEvent, ButtonGroup, HitShape};
    pub use tuggle_ui_graphics::{Color, Point, Rect, Size};
}
