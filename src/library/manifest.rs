//! Playlist manifests: a TOML file listing tracks explicitly.
//!
//! ```toml
//! [[track]]
//! title = "Intro"
//! artist = "Someone"
//! src = "01-intro.flac"
//! duration = "1:12"
//! ```
//!
//! Relative `src` paths are resolved against the manifest's own directory.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::LibraryError;
use super::model::TrackDescriptor;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Manifest {
    #[serde(rename = "track")]
    tracks: Vec<TrackDescriptor>,
}

/// Parse manifest text. `base` is the directory relative sources hang off.
pub fn parse_manifest(text: &str, base: &Path) -> Result<Vec<TrackDescriptor>, toml::de::Error> {
    let manifest: Manifest = toml::from_str(text)?;
    Ok(manifest
        .tracks
        .into_iter()
        .map(|mut desc| {
            desc.src = desc.src.map(|src| resolve_source(&src, base));
            desc
        })
        .collect())
}

/// Read and parse the manifest at `path`.
pub fn read_manifest(path: &Path) -> Result<Vec<TrackDescriptor>, LibraryError> {
    let text = fs::read_to_string(path).map_err(|source| LibraryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    parse_manifest(&text, base).map_err(|source| LibraryError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn resolve_source(src: &str, base: &Path) -> String {
    let p = Path::new(src.trim());
    if p.is_relative() && !src.trim().is_empty() {
        base.join(p).to_string_lossy().into_owned()
    } else {
        src.trim().to_string()
    }
}
