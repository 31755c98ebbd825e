//! Testing utilities for Tuggle.
//!
//! [`RobotTestRule`] runs a real [`AppShell`](tuggle_app_shell::AppShell)
//! headlessly against a manual clock, so gestures and animations are
//! reproducible frame by frame.

mod robot;

pub use robot::{run_robot_test, RobotTestRule, FRAME_MILLIS, ROBOT_DISPLAY};
