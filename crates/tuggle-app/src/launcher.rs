//! Application launcher.
//!
//! `AppLauncher` collects window and shell settings, then hands the page
//! list to the platform runtime.

use tuggle_app_shell::ShellSettings;
use tuggle_ui::Page;

#[cfg(feature = "desktop")]
use crate::LaunchError;

/// Environment variable selecting the page shown at startup.
pub const START_PAGE_ENV: &str = "TUGGLE_START_PAGE";

/// Configuration for application settings.
#[derive(Clone, Debug)]
pub struct AppSettings {
    /// Window title
    pub window_title: String,
    /// Initial window width in logical pixels
    pub initial_width: u32,
    /// Initial window height in logical pixels
    pub initial_height: u32,
    /// Page to jump to before the first frame. Out of range values clamp.
    pub start_page: Option<isize>,
    /// Draw the FPS overlay.
    pub fps_counter: bool,
    /// Shell parameters. The display size is replaced by the window size.
    pub shell: ShellSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            window_title: "Tuggle".into(),
            initial_width: 420,
            initial_height: 860,
            start_page: None,
            fps_counter: false,
            shell: ShellSettings::default(),
        }
    }
}

impl AppSettings {
    /// Default settings with [`START_PAGE_ENV`] applied.
    pub fn from_env() -> Self {
        let start_page = std::env::var(START_PAGE_ENV)
            .ok()
            .and_then(|value| parse_start_page(&value));
        Self {
            start_page,
            ..Self::default()
        }
    }
}

/// Parses a start page index, logging and ignoring anything else.
pub fn parse_start_page(value: &str) -> Option<isize> {
    match value.trim().parse::<isize>() {
        Ok(index) => Some(index),
        Err(err) => {
            log::warn!("ignoring {START_PAGE_ENV}={value:?}: {err}");
            None
        }
    }
}

/// Builder that configures and launches the app.
///
/// ```no_run
/// use tuggle_app::AppLauncher;
///
/// fn main() -> Result<(), tuggle_app::LaunchError> {
///     AppLauncher::new()
///         .with_title("Toys")
///         .with_size(420, 860)
///         .run(Vec::new())
/// }
/// ```
pub struct AppLauncher {
    settings: AppSettings,
}

impl AppLauncher {
    /// Launcher with settings from the environment.
    pub fn new() -> Self {
        Self {
            settings: AppSettings::from_env(),
        }
    }

    /// Launcher with explicit settings.
    pub fn with_settings(settings: AppSettings) -> Self {
        Self { settings }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.settings.window_title = title.into();
        self
    }

    /// Set the initial window size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.settings.initial_width = width;
        self.settings.initial_height = height;
        self
    }

    /// Start on `index` instead of the first page.
    pub fn with_start_page(mut self, index: isize) -> Self {
        self.settings.start_page = Some(index);
        self
    }

    /// Toggle the FPS overlay.
    pub fn with_fps_counter(mut self, enabled: bool) -> Self {
        self.settings.fps_counter = enabled;
        self
    }

    /// Replace the shell settings.
    pub fn with_shell(mut self, shell: ShellSettings) -> Self {
        self.settings.shell = shell;
        self
    }

    /// The settings the app will launch with.
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Run the application until its window closes.
    #[cfg(feature = "desktop")]
    pub fn run(self, pages: Vec<Box<dyn Page>>) -> Result<(), LaunchError> {
        crate::desktop::run(self.settings, pages)
    }
}

impl Default for AppLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/launcher_tests.rs"]
mod tests;
