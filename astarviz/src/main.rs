use std::fs::File;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use astarviz_core::{App, AppConfig};
use astarviz_crossterm::CrosstermDriver;
use astarviz_lib::{Args, Visualizer};
use clap::Parser;

/// The terminal is taken over by the UI, so logs only go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to install logger")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let settings = args.settings();
    log::info!("astarviz starting: {settings:?}");
    let (width, height) = settings.screen_size();
    let tick = Duration::from_millis(args.tick_ms);

    let mut app = App::new(AppConfig {
        model: Visualizer::new(settings),
        driver: CrosstermDriver::new().with_poll_timeout(tick.min(Duration::from_millis(16))),
        width,
        height,
        tick: Some(tick),
    });
    app.run()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("Terminal UI failed")?;
    Ok(())
}
