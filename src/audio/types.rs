//! Commands, shared info and errors for the audio thread.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::player::EngineEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Open the file at `path`, paused at position zero. Events emitted for
    /// it carry `generation`.
    Load { path: String, generation: u64 },
    /// Resume (or restart, if the source already ended).
    Play,
    Pause,
    /// Jump to an absolute position in the loaded source.
    Seek(Duration),
    /// Linear gain in `[0, 1]`.
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Playback information published by the audio thread.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineInfo {
    /// Position within the loaded source.
    pub current_time: Duration,
    /// Total length, once known.
    pub duration: Option<Duration>,
    pub volume: f64,
}

impl Default for EngineInfo {
    fn default() -> Self {
        Self {
            current_time: Duration::ZERO,
            duration: None,
            volume: 1.0,
        }
    }
}

pub type InfoHandle = Arc<Mutex<EngineInfo>>;

/// An event tagged with the load generation it belongs to.
pub type TaggedEvent = (u64, EngineEvent);

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no audio output device: {0}")]
    OutputDevice(#[from] rodio::StreamError),

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("audio thread exited before it was ready")]
    ThreadGone,
}
