use std::path::Path;

use serde::Deserialize;

/// A raw track descriptor as it comes from a playlist source.
///
/// Every field is optional; `load_playlist` decides what to do with gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TrackDescriptor {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub src: Option<String>,
    pub duration: Option<String>,
}

/// One playable item. Immutable once it is part of a `Playlist`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Locator handed to the playback engine (a file path).
    pub source: String,
    /// Precomputed label shown until the engine reports the real duration.
    pub duration_label: String,
}

impl Track {
    fn from_descriptor(desc: TrackDescriptor) -> Option<Self> {
        let source = desc.src.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;

        let title = desc
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| {
                Path::new(&source)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("UNKNOWN")
                    .to_string()
            });

        Some(Self {
            title,
            artist: desc.artist.map(|a| a.trim().to_string()).unwrap_or_default(),
            source,
            duration_label: desc.duration.map(|d| d.trim().to_string()).unwrap_or_default(),
        })
    }
}

/// The fixed, ordered set of tracks for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }
}

/// Build a playlist from descriptors, in order.
///
/// Descriptors without a source locator cannot be played and are skipped. An
/// empty input yields an empty playlist; that is a valid state, not an error.
pub fn load_playlist(entries: Vec<TrackDescriptor>) -> Playlist {
    let total = entries.len();
    let tracks: Vec<Track> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, desc)| {
            let track = Track::from_descriptor(desc);
            if track.is_none() {
                tracing::warn!(position = i, "skipping track descriptor without a source");
            }
            track
        })
        .collect();

    tracing::debug!(loaded = tracks.len(), total, "playlist loaded");
    Playlist { tracks }
}
