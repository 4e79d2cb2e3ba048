//! Dynamic terrain demo: flies a camera over an endlessly tiled height map.

mod config;
mod context;

use anyhow::Result;

use crate::config::{config_path, TerrainDemoConfig};
use crate::context::TerrainContext;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting dynamic terrain demo");

    let config = if config_path().exists() {
        TerrainDemoConfig::load()
    } else {
        let config = TerrainDemoConfig::default();
        config.save();
        config
    };

    let mut ctx = TerrainContext::init(config)?;
    ctx.run();
    log::info!(
        "Camera {:?} over terrain offset {:?} (map at {:?}) after {} frames",
        ctx.camera(),
        ctx.terrain_offset(),
        ctx.map_transform().position,
        ctx.frame_count()
    );
    ctx.shutdown();

    Ok(())
}
