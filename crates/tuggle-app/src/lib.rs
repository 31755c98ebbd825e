#![deny(missing_docs)]

//! High level utilities for running Tuggle with minimal boilerplate.

mod launcher;
pub use launcher::{parse_start_page, AppLauncher, AppSettings, START_PAGE_ENV};

#[cfg(feature = "desktop")]
mod desktop;

pub use tuggle_app_shell::ShellSettings;

/// Failure to bring up the host window or its drawing surface.
#[derive(Debug)]
pub enum LaunchError {
    /// The platform event loop could not be created or exited abnormally.
    EventLoop(String),
    /// The window could not be created.
    Window(String),
    /// The pixel surface could not be created.
    Surface(String),
}

impl std::fmt::Display for LaunchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaunchError::EventLoop(err) => write!(f, "event loop failed: {err}"),
            LaunchError::Window(err) => write!(f, "failed to create window: {err}"),
            LaunchError::Surface(err) => write!(f, "failed to create pixel surface: {err}"),
        }
    }
}

impl std::error::Error for LaunchError {}
