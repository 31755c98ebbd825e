//! Horizontally paged carousel of [`Page`](crate::Page)s.

mod controller;
mod pagination;

pub use controller::{Carousel, CarouselConfig, CarouselMode, SNAP_DURATION, SWIPE_VELOCITY_THRESHOLD};
pub use pagination::{PaginationDots, PaginationStyle};
