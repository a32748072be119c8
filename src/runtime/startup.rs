use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config;
use crate::player::{PlaybackEngine, PlayerController};
use crate::ui::PlayerView;

/// Send `tracing` output to the configured log file.
///
/// Without a file nothing is installed: the terminal belongs to the UI.
pub fn init_logging(logging: &config::LoggingSettings) -> anyhow::Result<()> {
    let Some(path) = logging.file.as_ref() else {
        return Ok(());
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;
    Ok(())
}

/// Apply configured startup volume and autoplay.
pub fn apply_playback_defaults<E: PlaybackEngine>(
    controller: &mut PlayerController<E, PlayerView>,
    settings: &config::Settings,
) {
    controller.set_volume(settings.playback.initial_volume);
    if settings.playback.autoplay != controller.state().is_autoplay_enabled {
        controller.toggle_autoplay();
    }
}
