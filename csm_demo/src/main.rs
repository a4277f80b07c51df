//! Cascaded shadow map demo
//!
//! Usage: `csm_demo [config.toml|config.ron]`
//!
//! Without a window or GPU this runs the per-frame shadow setup over the
//! demo scene and logs what a renderer would upload.

mod app;

use csm_engine::config::{Config, ConfigError, DemoConfig};
use csm_engine::foundation::logging;
use csm_engine::render::RenderError;
use csm_engine::scene::SceneError;
use thiserror::Error;

use app::ShadowDemo;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

fn main() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::load_from_file(&path)?,
        None => DemoConfig::default(),
    };

    logging::init(&config.log_level);
    config.validate()?;
    log::info!("Starting {}", config.title);

    let mut demo = ShadowDemo::new(config)?;
    let stats = demo.run()?;

    log::info!(
        "Finished {} frames: {} depth draws, {} lit draws, {} depth-map frames, {} uniform bytes per frame",
        stats.frames,
        stats.depth_draws,
        stats.lighting_draws,
        stats.depth_map_frames,
        stats.uniform_bytes
    );
    Ok(())
}
