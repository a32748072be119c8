//! Test doubles for the controller's collaborators.

use crate::library::{Playlist, TrackDescriptor, load_playlist};

use super::display::DisplaySurface;
use super::engine::PlaybackEngine;
use super::state::VolumeIcon;

#[derive(Debug, Default)]
pub struct FakeEngine {
    pub source: Option<String>,
    pub loads: usize,
    pub playing: bool,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub volume: f64,
    pub seeks: Vec<f64>,
}

impl PlaybackEngine for FakeEngine {
    fn set_source(&mut self, locator: &str) {
        self.source = Some(locator.to_string());
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn load(&mut self) {
        self.loads += 1;
        self.current_time = 0.0;
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.seeks.push(seconds);
        self.current_time = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }
}

/// Records the last value pushed to each indicator.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingDisplay {
    pub title: String,
    pub artist: String,
    pub elapsed: String,
    pub duration: String,
    pub progress: f64,
    pub volume_level: f64,
    pub volume_icon: Option<VolumeIcon>,
    pub autoplay: bool,
    pub active: Option<usize>,
    pub playing: bool,
}

impl DisplaySurface for RecordingDisplay {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_artist(&mut self, artist: &str) {
        self.artist = artist.to_string();
    }

    fn set_elapsed(&mut self, label: &str) {
        self.elapsed = label.to_string();
    }

    fn set_duration(&mut self, label: &str) {
        self.duration = label.to_string();
    }

    fn set_progress(&mut self, fraction: f64) {
        self.progress = fraction;
    }

    fn set_volume_level(&mut self, volume: f64) {
        self.volume_level = volume;
    }

    fn set_volume_icon(&mut self, icon: VolumeIcon) {
        self.volume_icon = Some(icon);
    }

    fn set_autoplay(&mut self, enabled: bool) {
        self.autoplay = enabled;
    }

    fn set_active_track(&mut self, index: Option<usize>) {
        self.active = index;
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }
}

/// A playlist of `n` tracks named `Track 0..n` by `Artist 0..n`.
pub fn playlist_of(n: usize) -> Playlist {
    load_playlist(
        (0..n)
            .map(|i| TrackDescriptor {
                title: Some(format!("Track {i}")),
                artist: Some(format!("Artist {i}")),
                src: Some(format!("/music/{i}.mp3")),
                duration: Some("3:00".to_string()),
            })
            .collect(),
    )
}
