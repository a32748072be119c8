//! Plain state types owned by `PlayerController`.

/// Which way `advance` moves through the playlist.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Mute-button face derived from the current volume.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VolumeIcon {
    /// Volume is exactly zero.
    Mute,
    /// Volume in `(0, 0.5)`.
    Low,
    /// Volume in `[0.5, 1]`.
    High,
}

impl VolumeIcon {
    pub fn for_volume(volume: f64) -> Self {
        if volume <= 0.0 {
            Self::Mute
        } else if volume < 0.5 {
            Self::Low
        } else {
            Self::High
        }
    }
}

/// Playback flags and levels. Only `PlayerController` mutates this.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Index into the playlist; meaningful once a source has been assigned.
    pub current_index: usize,
    pub is_playing: bool,
    pub is_autoplay_enabled: bool,
    /// Always within `[0, 1]`.
    pub volume: f64,
    /// Volume to restore on unmute. Overwritten on every mute.
    pub muted_remembered_volume: Option<f64>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_index: 0,
            is_playing: false,
            is_autoplay_enabled: false,
            volume: 1.0,
            muted_remembered_volume: None,
        }
    }
}
