//! Fidget toys for the Tuggle carousel.

pub mod app;

use tuggle_app::AppLauncher;

pub fn create_app() -> AppLauncher {
    AppLauncher::new().with_title("Tuggle").with_size(420, 860)
}
