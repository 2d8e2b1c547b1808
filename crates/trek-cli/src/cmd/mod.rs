pub mod completions;
pub mod play;
pub mod simulate;
pub mod verify;
pub mod world;

use std::path::Path;

use anyhow::{Context, Result};
use trek_core::World;
use trek_core::config::TrekConfig;

/// Load the world named on the command line, else the config's, else the
/// bundled campus map.
///
/// # Errors
///
/// Fails if the world file cannot be read or does not validate.
pub fn load_world(explicit: Option<&Path>, config: &TrekConfig) -> Result<World> {
    match explicit.or(config.game.world.as_deref()) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading world");
            World::load(path).with_context(|| format!("Failed to load world {}", path.display()))
        }
        None => World::builtin().context("bundled world"),
    }
}
