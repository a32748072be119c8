use std::path::Path;

use crate::config::RowField;

use super::model::Track;

/// Build the playlist row text for `track` from the configured `fields`.
///
/// Empty fields are skipped; when nothing is left the title is used.
pub fn row_text(track: &Track, fields: &[RowField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        match f {
            RowField::Title => {
                if !track.title.trim().is_empty() {
                    parts.push(track.title.trim().to_string());
                }
            }
            RowField::Artist => {
                if !track.artist.trim().is_empty() {
                    parts.push(track.artist.trim().to_string());
                }
            }
            RowField::Duration => {
                if !track.duration_label.trim().is_empty() {
                    parts.push(track.duration_label.trim().to_string());
                }
            }
            RowField::Filename => {
                if let Some(stem) = Path::new(&track.source).file_stem().and_then(|s| s.to_str()) {
                    if !stem.trim().is_empty() {
                        parts.push(stem.to_string());
                    }
                }
            }
            RowField::Path => {
                parts.push(track.source.clone());
            }
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}
