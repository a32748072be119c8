use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::player::{EngineEvent, PlaybackEngine};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, EngineError, EngineInfo, InfoHandle, TaggedEvent};

/// `PlaybackEngine` backed by a dedicated `rodio` thread.
///
/// Commands are fire-and-forget; position and duration are read from the
/// info the thread publishes. Writes that the controller reads straight back
/// (position after a seek, position and duration after a load) are applied
/// to the shared info immediately.
pub struct RodioEngine {
    tx: Sender<AudioCmd>,
    info: InfoHandle,
    source: Option<String>,
    generation: Arc<AtomicU64>,
    join: Option<JoinHandle<()>>,
}

/// Notifications from the audio thread for the source loaded last.
///
/// Every `load` starts a new generation; events still queued for a replaced
/// source are dropped here.
pub struct EngineEvents {
    rx: Receiver<TaggedEvent>,
    generation: Arc<AtomicU64>,
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        loop {
            let (generation, event) = self.rx.try_recv().ok()?;
            let current = self.generation.load(Ordering::Acquire);
            if generation == current {
                return Some(event);
            }
            tracing::debug!(?event, generation, current, "dropping event for a replaced source");
        }
    }
}

impl RodioEngine {
    /// Open the default output device on a new audio thread.
    ///
    /// Returns the engine and the stream of notifications it emits.
    pub fn spawn(settings: AudioSettings) -> Result<(Self, EngineEvents), EngineError> {
        let (tx, rx) = mpsc::channel();
        let (events_tx, events_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let info: InfoHandle = Arc::new(Mutex::new(EngineInfo::default()));

        let join = spawn_audio_thread(rx, info.clone(), events_tx, settings, ready_tx);
        ready_rx.recv().map_err(|_| EngineError::ThreadGone)??;

        let (mut engine, events) = Self::from_parts(tx, info, events_rx);
        engine.join = Some(join);
        Ok((engine, events))
    }

    pub(super) fn from_parts(
        tx: Sender<AudioCmd>,
        info: InfoHandle,
        events: Receiver<TaggedEvent>,
    ) -> (Self, EngineEvents) {
        let generation = Arc::new(AtomicU64::new(0));
        let engine = Self {
            tx,
            info,
            source: None,
            generation: generation.clone(),
            join: None,
        };
        (
            engine,
            EngineEvents {
                rx: events,
                generation,
            },
        )
    }

    /// Stop playback (fading out over `fade_out_ms`) and wait for the audio
    /// thread to finish.
    pub fn shutdown(mut self, fade_out_ms: u64) {
        self.send(AudioCmd::Quit { fade_out_ms });
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                tracing::warn!("audio thread panicked");
            }
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if self.tx.send(cmd).is_err() {
            tracing::warn!("audio thread is gone; dropping command");
        }
    }

    fn with_info<T>(&self, f: impl FnOnce(&EngineInfo) -> T, fallback: T) -> T {
        self.info.lock().map(|i| f(&i)).unwrap_or(fallback)
    }
}

impl PlaybackEngine for RodioEngine {
    fn set_source(&mut self, locator: &str) {
        self.source = Some(locator.to_string());
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn load(&mut self) {
        let Some(src) = self.source.clone() else {
            return;
        };
        if let Ok(mut info) = self.info.lock() {
            info.current_time = Duration::ZERO;
            info.duration = None;
        }
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.send(AudioCmd::Load {
            path: src,
            generation,
        });
    }

    fn play(&mut self) {
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn current_time(&self) -> f64 {
        self.with_info(|i| i.current_time.as_secs_f64(), 0.0)
    }

    fn set_current_time(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        let mut to = Duration::from_secs_f64(seconds.max(0.0));
        if let Ok(mut info) = self.info.lock() {
            if let Some(d) = info.duration {
                to = to.min(d);
            }
            info.current_time = to;
        }
        self.send(AudioCmd::Seek(to));
    }

    fn duration(&self) -> Option<f64> {
        self.with_info(|i| i.duration.map(|d| d.as_secs_f64()), None)
    }

    fn set_volume(&mut self, volume: f64) {
        if let Ok(mut info) = self.info.lock() {
            info.volume = volume;
        }
        self.send(AudioCmd::SetVolume(volume as f32));
    }
}
