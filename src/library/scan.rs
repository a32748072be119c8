use std::path::Path;

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::player::format_time;

use super::model::TrackDescriptor;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Describe a single audio file from its tags.
///
/// Unreadable tags are not an error: the title falls back to the file stem and
/// the duration label is left empty.
pub fn describe_file(path: &Path) -> TrackDescriptor {
    let mut desc = TrackDescriptor {
        title: path.file_stem().and_then(|s| s.to_str()).map(str::to_string),
        artist: None,
        src: Some(path.to_string_lossy().into_owned()),
        duration: None,
    };

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            let secs = tagged.properties().duration().as_secs_f64();
            if secs > 0.0 {
                desc.duration = Some(format_time(secs));
            }

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title() {
                    if !v.trim().is_empty() {
                        desc.title = Some(v.trim().to_string());
                    }
                }
                if let Some(v) = tag.artist() {
                    if !v.trim().is_empty() {
                        desc.artist = Some(v.trim().to_string());
                    }
                }
            }
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), "no readable tags: {e}");
        }
    }

    desc
}

/// Walk `dir` and describe every audio file found, sorted by artist then title.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<TrackDescriptor> {
    let mut found: Vec<TrackDescriptor> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            found.push(describe_file(path));
        }
    }

    found.sort_by_key(sort_key);
    tracing::info!(dir = %dir.display(), tracks = found.len(), "scanned library");
    found
}

fn sort_key(desc: &TrackDescriptor) -> (String, String) {
    let lower = |s: &Option<String>| s.as_deref().unwrap_or("").to_lowercase();
    (lower(&desc.artist), lower(&desc.title))
}
