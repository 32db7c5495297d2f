use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use room_viewer::app::App;
use room_viewer::cli::Cli;
use room_viewer::config::ViewerConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ViewerConfig::from_cli(&cli)?;

    log::info!(
        "Room Viewer - {} views, drag to orbit, right-drag to pan, wheel to zoom, 1-9 to switch views, Escape to quit",
        config.catalog.len()
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
