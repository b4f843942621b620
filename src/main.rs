//! Particle Life
//!
//! Opens a 1000x1000 window titled "particle-life" and runs the simulation at 60 FPS.

use anyhow::Context;
use particle_life::{launch, AppConfig, Simulation};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting particle-life");

    let config = AppConfig::load().context("failed to load configuration")?;
    log::info!(
        "✓ Config: {}x{} @ {} FPS, {} engine",
        config.window.width,
        config.window.height,
        config.window.foreground_fps,
        config.simulation.engine
    );

    let simulation = Simulation::new(&config);
    launch(&config.window, simulation)?;

    Ok(())
}
