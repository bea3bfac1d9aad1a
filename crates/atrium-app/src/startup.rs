//! Startup: config resolution, logging, and the initial scene.

use std::path::{Path, PathBuf};

use atrium_config::Config;
use tracing::info;

use crate::layout::{LayoutError, SceneLayout};
use crate::walkthrough::Walkthrough;

/// Load `config.ron` from `config_dir`, creating it if missing. Any error
/// falls back to defaults; logging is not up yet, so it goes to stderr.
pub fn load_config(config_dir: &Path) -> Config {
    Config::load_or_create(config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    })
}

/// Bring up config, logging, and a walkthrough over `layout` (the built-in
/// gallery when `None`).
///
/// `config_dir` defaults to the platform config directory. Without one the
/// defaults are used and nothing is written to disk.
pub fn start(config_dir: Option<&Path>, layout: Option<&Path>) -> Result<Walkthrough, LayoutError> {
    let config_dir: Option<PathBuf> = config_dir
        .map(Path::to_path_buf)
        .or_else(Config::default_dir);
    let config = match &config_dir {
        Some(dir) => load_config(dir),
        None => Config::default(),
    };

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    atrium_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    let layout = match layout {
        Some(path) => SceneLayout::load(path)?,
        None => SceneLayout::gallery()?,
    };
    info!(
        config_dir = ?config_dir,
        start = ?config.camera.start_position,
        "starting walkthrough"
    );
    Ok(Walkthrough::new(config, &layout))
}
