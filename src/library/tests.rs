use super::*;
use crate::config::RowField;
use std::fs;
use tempfile::tempdir;

fn desc(title: Option<&str>, artist: Option<&str>, src: Option<&str>) -> TrackDescriptor {
    TrackDescriptor {
        title: title.map(str::to_string),
        artist: artist.map(str::to_string),
        src: src.map(str::to_string),
        duration: None,
    }
}

#[test]
fn load_playlist_keeps_order() {
    let playlist = load_playlist(vec![
        desc(Some("B"), Some("X"), Some("/m/b.mp3")),
        desc(Some("A"), Some("Y"), Some("/m/a.mp3")),
    ]);
    let titles: Vec<&str> = playlist.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A"]);
}

#[test]
fn load_playlist_of_nothing_is_empty_not_an_error() {
    let playlist = load_playlist(Vec::new());
    assert!(playlist.is_empty());
    assert_eq!(playlist.len(), 0);
    assert!(playlist.get(0).is_none());
}

#[test]
fn load_playlist_skips_descriptors_without_source() {
    let playlist = load_playlist(vec![
        desc(Some("no source"), None, None),
        desc(Some("blank source"), None, Some("   ")),
        desc(Some("ok"), None, Some("/m/ok.mp3")),
    ]);
    assert_eq!(playlist.len(), 1);
    assert_eq!(playlist.tracks()[0].title, "ok");
}

#[test]
fn load_playlist_fills_gaps() {
    let playlist = load_playlist(vec![desc(None, None, Some("/m/01 Opening.flac"))]);
    let track = playlist.get(0).unwrap();
    assert_eq!(track.title, "01 Opening");
    assert_eq!(track.artist, "");
    assert_eq!(track.duration_label, "");
    assert_eq!(track.source, "/m/01 Opening.flac");
}

#[test]
fn parse_manifest_resolves_relative_sources() {
    let text = r#"
[[track]]
title = "Intro"
artist = "Band"
src = "01-intro.flac"
duration = "1:12"

[[track]]
title = "Absolute"
src = "/srv/music/abs.mp3"
"#;
    let found = parse_manifest(text, Path::new("/home/me/album")).unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].src.as_deref(), Some("/home/me/album/01-intro.flac"));
    assert_eq!(found[0].duration.as_deref(), Some("1:12"));
    assert_eq!(found[0].artist.as_deref(), Some("Band"));
    assert_eq!(found[1].src.as_deref(), Some("/srv/music/abs.mp3"));
    assert_eq!(found[1].artist, None);
}

#[test]
fn parse_manifest_without_tracks_is_empty() {
    assert!(parse_manifest("", Path::new("/")).unwrap().is_empty());
}

#[test]
fn parse_manifest_rejects_bad_toml() {
    assert!(parse_manifest("[[track]\ntitle = ", Path::new("/")).is_err());
}

#[test]
fn descriptors_from_path_reads_manifest_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("set.toml");
    fs::write(
        &path,
        r#"
[[track]]
title = "One"
src = "one.mp3"
"#,
    )
    .unwrap();

    let found = descriptors_from_path(&path, &crate::config::LibrarySettings::default()).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].src.as_deref(),
        Some(dir.path().join("one.mp3").to_str().unwrap())
    );
}

#[test]
fn descriptors_from_path_reports_manifest_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[track]\n").unwrap();

    let err = descriptors_from_path(&path, &crate::config::LibrarySettings::default()).unwrap_err();
    assert!(matches!(err, LibraryError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn descriptors_from_path_missing_source_is_empty() {
    let dir = tempdir().unwrap();
    let found = descriptors_from_path(
        &dir.path().join("nope"),
        &crate::config::LibrarySettings::default(),
    )
    .unwrap();
    assert!(found.is_empty());
}

#[test]
fn row_text_composes_configured_fields() {
    let track = Track {
        title: "Song".to_string(),
        artist: "  Artist  ".to_string(),
        source: "/tmp/file-name.mp3".to_string(),
        duration_label: "3:05".to_string(),
    };

    assert_eq!(
        row_text(&track, &[RowField::Artist, RowField::Title], " - "),
        "Artist - Song"
    );
    assert_eq!(
        row_text(&track, &[RowField::Filename, RowField::Duration], " | "),
        "file-name | 3:05"
    );

    let anonymous = Track {
        artist: String::new(),
        ..track
    };
    assert_eq!(row_text(&anonymous, &[RowField::Artist], " - "), "Song");
}
