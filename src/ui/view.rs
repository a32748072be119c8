use crate::player::{DisplaySurface, VolumeIcon};

/// Everything the terminal shows about playback, as last pushed by the
/// controller, plus the playlist cursor.
///
/// The cursor is presentation-only: it moves freely with `j`/`k` and snaps
/// back to the active track whenever a new one is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub title: String,
    pub artist: String,
    pub elapsed: String,
    pub duration: String,
    pub progress: f64,
    pub volume: f64,
    pub volume_icon: VolumeIcon,
    pub autoplay: bool,
    pub active: Option<usize>,
    pub playing: bool,
    cursor: usize,
}

impl Default for PlayerView {
    fn default() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            elapsed: "0:00".to_string(),
            duration: "0:00".to_string(),
            progress: 0.0,
            volume: 1.0,
            volume_icon: VolumeIcon::High,
            autoplay: false,
            active: None,
            playing: false,
            cursor: 0,
        }
    }
}

impl PlayerView {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor down one row, wrapping to the top.
    pub fn cursor_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor.min(len - 1) + 1) % len;
    }

    /// Move the cursor up one row, wrapping to the bottom.
    pub fn cursor_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let cur = self.cursor.min(len - 1);
        self.cursor = (cur + len - 1) % len;
    }
}

impl DisplaySurface for PlayerView {
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
        self.volume = volume;
    }

    fn set_volume_icon(&mut self, icon: VolumeIcon) {
        self.volume_icon = icon;
    }

    fn set_autoplay(&mut self, enabled: bool) {
        self.autoplay = enabled;
    }

    fn set_active_track(&mut self, index: Option<usize>) {
        self.active = index;
        if let Some(i) = index {
            self.cursor = i;
        }
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }
}
