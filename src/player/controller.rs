//! The `PlayerController`: single authority over what is loaded, whether it
//! plays, at which volume, and whether the next track follows automatically.
//!
//! All operations run to completion on the caller's thread. Invalid requests
//! (out-of-range index, empty playlist, seek before metadata) are absorbed.

use crate::library::{Playlist, Track};

use super::display::DisplaySurface;
use super::engine::{EngineEvent, PlaybackEngine};
use super::state::{Direction, PlaybackState, VolumeIcon};
use super::time::format_time;

pub struct PlayerController<E, D> {
    playlist: Playlist,
    state: PlaybackState,
    engine: E,
    display: D,
}

impl<E: PlaybackEngine, D: DisplaySurface> PlayerController<E, D> {
    /// Wire a controller to its collaborators and push the initial indicator
    /// state (paused, autoplay off, full volume) to both.
    pub fn new(playlist: Playlist, engine: E, display: D) -> Self {
        let mut controller = Self {
            playlist,
            state: PlaybackState::default(),
            engine,
            display,
        };
        controller.display.set_playing(false);
        controller.display.set_autoplay(false);
        controller.display.set_active_track(None);
        controller.display.set_elapsed(&format_time(0.0));
        controller.display.set_duration(&format_time(0.0));
        controller.display.set_progress(0.0);
        controller.apply_volume(controller.state.volume);
        controller
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable access for presentation-only state (cursor, scrolling).
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Give the engine back, e.g. to shut it down.
    pub fn into_engine(self) -> E {
        self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Whether the engine currently has a source assigned.
    pub fn has_source(&self) -> bool {
        self.engine.source().is_some()
    }

    /// The loaded track, if any source has been assigned.
    pub fn current_track(&self) -> Option<&Track> {
        if self.has_source() {
            self.playlist.get(self.state.current_index)
        } else {
            None
        }
    }

    /// Load the track at `index` and start it from the beginning.
    ///
    /// Out-of-range indices are ignored.
    pub fn select_track(&mut self, index: usize) {
        let Some(track) = self.playlist.get(index) else {
            tracing::debug!(index, len = self.playlist.len(), "ignoring out-of-range track");
            return;
        };

        tracing::info!(index, title = %track.title, source = %track.source, "selecting track");

        self.state.current_index = index;
        self.engine.set_source(&track.source);
        self.engine.load();

        self.display.set_title(&track.title);
        self.display.set_artist(&track.artist);
        self.display.set_active_track(Some(index));
        self.display.set_elapsed(&format_time(0.0));
        self.display.set_progress(0.0);
        self.display.set_duration(&track.duration_label);

        self.play();
    }

    /// Flip between playing and paused, or start the first track when
    /// nothing has been loaded yet.
    pub fn toggle_play_pause(&mut self) {
        if self.has_source() {
            if self.state.is_playing {
                self.pause();
            } else {
                self.play();
            }
        } else if !self.playlist.is_empty() {
            self.select_track(0);
        }
    }

    /// Move to the neighbouring track, wrapping at both ends.
    pub fn advance(&mut self, direction: Direction) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }

        let current = self.state.current_index;
        let target = match direction {
            Direction::Next => (current + 1) % len,
            Direction::Previous => (current + len - 1) % len,
        };
        self.select_track(target);
    }

    /// Jump to `fraction` of the track's total duration.
    ///
    /// Dropped while the duration is still unknown.
    pub fn seek(&mut self, fraction: f64) {
        let Some(duration) = self.engine.duration() else {
            tracing::debug!(fraction, "seek before metadata; ignoring");
            return;
        };
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.engine.set_current_time(fraction * duration);
    }

    /// Apply `value` clamped to `[0, 1]`.
    pub fn set_volume(&mut self, value: f64) {
        let volume = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        self.apply_volume(volume);
    }

    /// Mute, remembering the current level, or restore the remembered level
    /// (full volume if nothing was ever remembered).
    pub fn toggle_mute(&mut self) {
        if self.state.volume > 0.0 {
            self.state.muted_remembered_volume = Some(self.state.volume);
            self.apply_volume(0.0);
        } else {
            let restored = self.state.muted_remembered_volume.unwrap_or(1.0);
            self.apply_volume(restored);
        }
    }

    /// Flip autoplay. Only affects what happens when the current track ends.
    pub fn toggle_autoplay(&mut self) {
        self.state.is_autoplay_enabled = !self.state.is_autoplay_enabled;
        self.display.set_autoplay(self.state.is_autoplay_enabled);
    }

    /// Route an engine notification to its handler.
    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::TimeUpdate => self.on_time_update(),
            EngineEvent::MetadataLoaded => self.on_metadata_loaded(),
            EngineEvent::Ended => self.on_ended(),
        }
    }

    pub fn on_ended(&mut self) {
        if self.state.is_autoplay_enabled {
            self.advance(Direction::Next);
        } else {
            self.pause();
        }
    }

    pub fn on_time_update(&mut self) {
        let Some(duration) = self.engine.duration().filter(|d| d.is_finite() && *d > 0.0) else {
            return;
        };
        let current = self.engine.current_time();
        self.display.set_progress((current / duration).clamp(0.0, 1.0));
        self.display.set_elapsed(&format_time(current));
    }

    pub fn on_metadata_loaded(&mut self) {
        if let Some(duration) = self.engine.duration() {
            self.display.set_duration(&format_time(duration));
        }
    }

    fn play(&mut self) {
        self.engine.play();
        self.state.is_playing = true;
        self.display.set_playing(true);
    }

    fn pause(&mut self) {
        self.engine.pause();
        self.state.is_playing = false;
        self.display.set_playing(false);
    }

    fn apply_volume(&mut self, volume: f64) {
        self.state.volume = volume;
        self.engine.set_volume(volume);
        self.display.set_volume_level(volume);
        self.display.set_volume_icon(VolumeIcon::for_volume(volume));
    }
}
