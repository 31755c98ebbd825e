mod button;

pub use button::{Button, ButtonEvent, ButtonGroup, HitShape};
