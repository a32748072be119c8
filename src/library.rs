//! Library: tracks, the playlist, and where playlists come from.
//!
//! A playlist is built from explicit `TrackDescriptor`s. Descriptors are read
//! from a TOML manifest or produced by scanning a directory of audio files.

use std::path::{Path, PathBuf};

use crate::config::LibrarySettings;

mod display;
mod manifest;
mod model;
mod scan;

pub use display::row_text;
pub use manifest::{parse_manifest, read_manifest};
pub use model::*;
pub use scan::{describe_file, scan};

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("failed to read playlist manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid playlist manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Collect descriptors from `path`.
///
/// A `.toml` file is a manifest, a directory is scanned, and any other file is
/// treated as a single track.
pub fn descriptors_from_path(
    path: &Path,
    settings: &LibrarySettings,
) -> Result<Vec<TrackDescriptor>, LibraryError> {
    if path.is_dir() {
        return Ok(scan(path, settings));
    }

    let is_manifest = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_manifest {
        read_manifest(path)
    } else if path.is_file() {
        Ok(vec![describe_file(path)])
    } else {
        tracing::warn!(path = %path.display(), "playlist source not found");
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests;
