use anyhow::Context;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Tuggle ===");
    println!("Swipe or drag sideways to change toys.");
    println!("Arrow keys tilt the simulated device, Space levels it, Escape quits.");
    println!();

    tuggle_demo::create_app()
        .run(tuggle_demo::app::pages())
        .context("tuggle-demo exited with an error")
}

