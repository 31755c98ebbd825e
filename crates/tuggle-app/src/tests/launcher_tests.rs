use super::*;

#[test]
fn start_page_parses_signed_integers() {
    assert_eq!(parse_start_page("3"), Some(3));
    assert_eq!(parse_start_page(" -2 "), Some(-2));
    assert_eq!(parse_start_page("third"), None);
    assert_eq!(parse_start_page(""), None);
}

#[test]
fn builder_overrides_settings() {
    let launcher = AppLauncher::with_settings(AppSettings::default())
        .with_title("Toys")
        .with_size(300, 600)
        .with_start_page(4)
        .with_fps_counter(true);
    let settings = launcher.settings();
    assert_eq!(settings.window_title, "Toys");
    assert_eq!((settings.initial_width, settings.initial_height), (300, 600));
    assert_eq!(settings.start_page, Some(4));
    assert!(settings.fps_counter);
}

#[test]
fn defaults_use_the_standard_scene() {
    let settings = AppSettings::default();
    assert_eq!(settings.window_title, "Tuggle");
    assert_eq!(settings.start_page, None);
    assert_eq!(settings.shell.scene_height, tuggle_app_shell::SCENE_HEIGHT);
}

#[test]
fn launch_errors_describe_the_failing_stage() {
    let err = crate::LaunchError::Window("no display".into());
    assert_eq!(err.to_string(), "failed to create window: no display");
}
