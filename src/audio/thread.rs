use std::path::Path;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::player::EngineEvent;

use super::sink::create_sink_at;
use super::types::{AudioCmd, EngineError, InfoHandle, TaggedEvent};

/// Position reached after playing since `started_at` on top of `accumulated`.
pub(super) fn elapsed(accumulated: Duration, started_at: Option<Instant>) -> Duration {
    accumulated + started_at.map_or(Duration::ZERO, |st| st.elapsed())
}

/// Where a seek to `requested` actually lands: never past the known end.
pub(super) fn seek_target(requested: Duration, duration: Option<Duration>) -> Duration {
    match duration {
        Some(d) => requested.min(d),
        None => requested,
    }
}

/// What `play` has to do to the sink.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum PlayStep {
    AlreadyPlaying,
    Resume,
    /// The source already ended; reopen it from the start.
    RestartFromZero,
}

/// Position and play/ended bookkeeping for the loaded source.
///
/// Knows nothing about sinks: `Deck` does the audio work and asks this
/// which notifications follow.
#[derive(Debug, Default)]
pub(super) struct Transport {
    pub(super) playing: bool,
    pub(super) ended: bool,
    // Track start time and accumulated elapsed when paused.
    pub(super) started_at: Option<Instant>,
    pub(super) accumulated: Duration,
    pub(super) duration: Option<Duration>,
}

impl Transport {
    pub(super) fn position(&self) -> Duration {
        elapsed(self.accumulated, self.started_at)
    }

    /// Record a length reported while opening the source. The first one wins.
    pub(super) fn learn_duration(&mut self, duration: Option<Duration>) {
        if self.duration.is_none() {
            self.duration = duration;
        }
    }

    /// Notifications after a load; `opened` is whether a sink exists.
    pub(super) fn loaded(&self, opened: bool) -> Vec<EngineEvent> {
        let mut events = Vec::with_capacity(2);
        if opened && self.duration.is_some() {
            events.push(EngineEvent::MetadataLoaded);
        }
        events.push(EngineEvent::TimeUpdate);
        events
    }

    pub(super) fn request_play(&mut self) -> PlayStep {
        if self.playing {
            PlayStep::AlreadyPlaying
        } else if self.ended {
            self.ended = false;
            self.accumulated = Duration::ZERO;
            PlayStep::RestartFromZero
        } else {
            PlayStep::Resume
        }
    }

    pub(super) fn started(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.playing = true;
    }

    /// Returns whether there was anything to pause.
    pub(super) fn pause(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.accumulated = self.position();
        self.started_at = None;
        self.playing = false;
        true
    }

    pub(super) fn seek_target(&self, requested: Duration) -> Duration {
        seek_target(requested, self.duration)
    }

    /// The sink now starts at `target`.
    pub(super) fn seeked(&mut self, target: Duration, now: Instant) -> EngineEvent {
        self.ended = false;
        self.accumulated = target;
        self.started_at = self.playing.then_some(now);
        EngineEvent::TimeUpdate
    }

    /// Periodic report. `drained` is whether the sink has run out.
    pub(super) fn tick(&mut self, drained: bool) -> Option<EngineEvent> {
        if !self.playing {
            return None;
        }
        if !drained {
            return Some(EngineEvent::TimeUpdate);
        }
        self.accumulated = self.duration.unwrap_or_else(|| self.position());
        self.started_at = None;
        self.playing = false;
        self.ended = true;
        Some(EngineEvent::Ended)
    }
}

/// Everything the audio thread owns between commands.
struct Deck {
    stream: OutputStream,
    info: InfoHandle,
    events: Sender<TaggedEvent>,

    path: Option<String>,
    generation: u64,
    sink: Option<Sink>,
    volume: f32,
    transport: Transport,
}

impl Deck {
    fn new(stream: OutputStream, info: InfoHandle, events: Sender<TaggedEvent>) -> Self {
        let volume = info.lock().map(|i| i.volume as f32).unwrap_or(1.0);
        Self {
            stream,
            info,
            events,
            path: None,
            generation: 0,
            sink: None,
            volume,
            transport: Transport::default(),
        }
    }

    fn emit(&self, event: EngineEvent) {
        // The receiver only goes away during shutdown.
        let _ = self.events.send((self.generation, event));
    }

    fn publish(&self) {
        if let Ok(mut info) = self.info.lock() {
            info.current_time = self.transport.position();
            info.duration = self.transport.duration;
        }
    }

    fn stop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    /// Replace the current sink with a fresh one positioned at `start_at`.
    fn rebuild(&mut self, start_at: Duration) -> bool {
        self.stop_sink();
        let Some(path) = self.path.clone() else {
            return false;
        };

        match create_sink_at(&self.stream, Path::new(&path), start_at) {
            Ok((sink, duration)) => {
                sink.set_volume(self.volume);
                self.transport.learn_duration(duration);
                self.sink = Some(sink);
                true
            }
            Err(e) => {
                tracing::warn!("{e}");
                false
            }
        }
    }

    fn load(&mut self, path: String, generation: u64) {
        tracing::debug!(%path, generation, "loading");
        self.path = Some(path);
        self.generation = generation;
        self.transport = Transport::default();

        let opened = self.rebuild(Duration::ZERO);
        self.publish();
        for event in self.transport.loaded(opened) {
            self.emit(event);
        }
    }

    fn play(&mut self) {
        match self.transport.request_play() {
            PlayStep::AlreadyPlaying => return,
            PlayStep::RestartFromZero => {
                if !self.rebuild(Duration::ZERO) {
                    return;
                }
            }
            PlayStep::Resume => {}
        }
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        sink.play();
        self.transport.started(Instant::now());
    }

    fn pause(&mut self) {
        if !self.transport.pause() {
            return;
        }
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
        self.publish();
    }

    fn seek(&mut self, requested: Duration) {
        if self.path.is_none() {
            return;
        }
        // Scrubbing: rebuild the current sink and skip into the file.
        let target = self.transport.seek_target(requested);
        if !self.rebuild(target) {
            return;
        }

        if self.transport.playing {
            if let Some(sink) = self.sink.as_ref() {
                sink.play();
            }
        }
        let event = self.transport.seeked(target, Instant::now());
        self.publish();
        self.emit(event);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(volume);
        }
    }

    fn tick(&mut self) {
        let drained = self.sink.as_ref().is_none_or(Sink::empty);
        if let Some(event) = self.transport.tick(drained) {
            self.publish();
            self.emit(event);
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(s) = self.sink.as_ref() {
            if self.transport.playing {
                // Fade out gently before stopping.
                fade_out_sink(s, self.volume, fade_out_ms);
            }
        }
        self.stop_sink();
        self.transport.playing = false;
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

/// Start the thread that owns the output stream.
///
/// `ready` receives exactly one message: whether the output device opened.
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    info: InfoHandle,
    events: Sender<TaggedEvent>,
    audio_settings: AudioSettings,
    ready: SyncSender<Result<(), EngineError>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(EngineError::OutputDevice(e)));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));
        let mut deck = Deck::new(stream, info, events);
        let mut next_tick = Instant::now() + tick;

        loop {
            let wait = next_tick.saturating_duration_since(Instant::now());
            match rx.recv_timeout(wait) {
                Ok(AudioCmd::Load { path, generation }) => deck.load(path, generation),
                Ok(AudioCmd::Play) => deck.play(),
                Ok(AudioCmd::Pause) => deck.pause(),
                Ok(AudioCmd::Seek(to)) => deck.seek(to),
                Ok(AudioCmd::SetVolume(v)) => deck.set_volume(v),
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    deck.quit(fade_out_ms);
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if Instant::now() >= next_tick {
                deck.tick();
                next_tick = Instant::now() + tick;
            }
        }
        tracing::debug!("audio thread exiting");
    })
}
