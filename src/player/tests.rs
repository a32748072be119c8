use super::testing::{FakeEngine, RecordingDisplay, playlist_of};
use super::*;

type TestController = PlayerController<FakeEngine, RecordingDisplay>;

fn controller(n: usize) -> TestController {
    PlayerController::new(playlist_of(n), FakeEngine::default(), RecordingDisplay::default())
}

#[test]
fn format_time_truncates_and_pads() {
    assert_eq!(format_time(0.0), "0:00");
    assert_eq!(format_time(59.0), "0:59");
    assert_eq!(format_time(60.0), "1:00");
    assert_eq!(format_time(90.7), "1:30");
    assert_eq!(format_time(90.9), "1:30");
    assert_eq!(format_time(3599.99), "59:59");
    assert_eq!(format_time(3600.0), "60:00");
}

#[test]
fn format_time_handles_garbage_input() {
    assert_eq!(format_time(-3.0), "0:00");
    assert_eq!(format_time(f64::NAN), "0:00");
    assert_eq!(format_time(f64::INFINITY), "0:00");
}

#[test]
fn new_pushes_initial_indicators() {
    let c = controller(2);
    let d = c.display();
    assert!(!d.playing);
    assert!(!d.autoplay);
    assert_eq!(d.active, None);
    assert_eq!(d.volume_level, 1.0);
    assert_eq!(d.volume_icon, Some(VolumeIcon::High));
    assert_eq!(c.engine().volume, 1.0);
    assert!(!c.has_source());
    assert!(c.current_track().is_none());
}

#[test]
fn select_track_loads_plays_and_updates_display() {
    let mut c = controller(3);
    c.select_track(1);

    assert_eq!(c.state().current_index, 1);
    assert!(c.state().is_playing);
    assert_eq!(c.engine().source.as_deref(), Some("/music/1.mp3"));
    assert_eq!(c.engine().loads, 1);
    assert!(c.engine().playing);

    let d = c.display();
    assert_eq!(d.title, "Track 1");
    assert_eq!(d.artist, "Artist 1");
    assert_eq!(d.active, Some(1));
    assert!(d.playing);
    assert_eq!(d.duration, "3:00");
    assert_eq!(d.elapsed, "0:00");
    assert_eq!(c.current_track().map(|t| t.title.as_str()), Some("Track 1"));
}

#[test]
fn select_track_again_restarts_from_zero() {
    let mut c = controller(2);
    c.select_track(0);
    c.engine_mut().current_time = 42.0;
    c.select_track(0);
    assert_eq!(c.engine().loads, 2);
    assert_eq!(c.engine().current_time, 0.0);
    assert!(c.state().is_playing);
}

#[test]
fn select_track_out_of_range_is_a_noop() {
    let mut c = controller(3);
    c.select_track(1);
    let state_before = c.state().clone();
    let display_before = c.display().clone();

    c.select_track(3);
    c.select_track(usize::MAX);

    assert_eq!(c.state(), &state_before);
    assert_eq!(c.display(), &display_before);
    assert_eq!(c.engine().loads, 1);
}

#[test]
fn toggle_play_pause_without_source_starts_first_track() {
    let mut c = controller(3);
    c.toggle_play_pause();
    assert_eq!(c.state().current_index, 0);
    assert!(c.state().is_playing);
    assert_eq!(c.engine().source.as_deref(), Some("/music/0.mp3"));
}

#[test]
fn toggle_play_pause_flips_when_source_assigned() {
    let mut c = controller(3);
    c.select_track(2);

    c.toggle_play_pause();
    assert!(!c.state().is_playing);
    assert!(!c.engine().playing);
    assert!(!c.display().playing);

    c.toggle_play_pause();
    assert!(c.state().is_playing);
    assert!(c.engine().playing);
    assert_eq!(c.engine().loads, 1, "resume must not reload");
}

#[test]
fn empty_playlist_makes_everything_a_noop() {
    let mut c = controller(0);
    c.toggle_play_pause();
    c.advance(Direction::Next);
    c.advance(Direction::Previous);
    c.select_track(0);
    c.handle_event(EngineEvent::Ended);

    assert!(!c.has_source());
    assert!(!c.state().is_playing);
    assert_eq!(c.engine().loads, 0);
}

#[test]
fn advance_wraps_in_both_directions() {
    let mut c = controller(3);
    c.select_track(2);
    c.advance(Direction::Next);
    assert_eq!(c.state().current_index, 0);

    c.advance(Direction::Previous);
    assert_eq!(c.state().current_index, 2);
}

#[test]
fn next_then_previous_returns_to_start() {
    for len in 2..6 {
        for start in 0..len {
            let mut c = controller(len);
            c.select_track(start);
            c.advance(Direction::Next);
            c.advance(Direction::Previous);
            assert_eq!(c.state().current_index, start, "len={len} start={start}");

            c.advance(Direction::Previous);
            c.advance(Direction::Next);
            assert_eq!(c.state().current_index, start, "len={len} start={start}");
        }
    }
}

#[test]
fn single_track_playlist_wraps_to_itself() {
    let mut c = controller(1);
    c.select_track(0);

    c.advance(Direction::Next);
    assert_eq!(c.state().current_index, 0);
    c.advance(Direction::Previous);
    assert_eq!(c.state().current_index, 0);
    assert_eq!(c.engine().loads, 3);
}

#[test]
fn seek_scales_fraction_by_duration() {
    let mut c = controller(1);
    c.select_track(0);
    c.engine_mut().duration = Some(200.0);

    c.seek(0.25);
    c.seek(1.5);
    c.seek(-1.0);
    assert_eq!(c.engine().seeks, vec![50.0, 200.0, 0.0]);
}

#[test]
fn seek_before_metadata_is_dropped() {
    let mut c = controller(1);
    c.select_track(0);
    c.seek(0.5);
    assert!(c.engine().seeks.is_empty());
}

#[test]
fn set_volume_clamps() {
    let mut c = controller(1);

    c.set_volume(-1.0);
    let low = (c.state().volume, c.display().volume_level, c.engine().volume);
    c.set_volume(0.0);
    assert_eq!(low, (c.state().volume, c.display().volume_level, c.engine().volume));
    assert_eq!(c.state().volume, 0.0);

    c.set_volume(2.0);
    let high = (c.state().volume, c.display().volume_level, c.engine().volume);
    c.set_volume(1.0);
    assert_eq!(high, (c.state().volume, c.display().volume_level, c.engine().volume));
    assert_eq!(c.state().volume, 1.0);

    c.set_volume(f64::NAN);
    assert_eq!(c.state().volume, 0.0);
}

#[test]
fn set_volume_is_idempotent() {
    let mut c = controller(1);
    c.set_volume(0.3);
    let once = (c.state().clone(), c.display().clone());
    c.set_volume(0.3);
    assert_eq!(once, (c.state().clone(), c.display().clone()));
}

#[test]
fn volume_icon_thresholds() {
    let mut c = controller(1);
    for (volume, icon) in [
        (0.0, VolumeIcon::Mute),
        (0.01, VolumeIcon::Low),
        (0.49, VolumeIcon::Low),
        (0.5, VolumeIcon::High),
        (1.0, VolumeIcon::High),
    ] {
        c.set_volume(volume);
        assert_eq!(c.display().volume_icon, Some(icon), "volume {volume}");
    }
}

#[test]
fn toggle_mute_twice_restores_previous_volume() {
    for start in [0.01, 0.3, 0.5, 0.77, 1.0] {
        let mut c = controller(1);
        c.set_volume(start);

        c.toggle_mute();
        assert_eq!(c.state().volume, 0.0);
        assert_eq!(c.display().volume_icon, Some(VolumeIcon::Mute));

        c.toggle_mute();
        assert_eq!(c.state().volume, start);
    }
}

#[test]
fn toggle_mute_from_zero_without_memory_restores_full_volume() {
    let mut c = controller(1);
    c.set_volume(0.0);
    c.toggle_mute();
    assert_eq!(c.state().volume, 1.0);
    assert_eq!(c.engine().volume, 1.0);
}

#[test]
fn unmute_reapplies_the_same_remembered_value() {
    let mut c = controller(1);
    c.set_volume(0.4);
    c.toggle_mute();
    c.toggle_mute();
    // Dragging to zero by hand keeps the old memory.
    c.set_volume(0.0);
    c.toggle_mute();
    assert_eq!(c.state().volume, 0.4);
    assert_eq!(c.state().muted_remembered_volume, Some(0.4));
}

#[test]
fn toggle_autoplay_does_not_touch_playback() {
    let mut c = controller(2);
    c.select_track(1);
    let loads = c.engine().loads;

    c.toggle_autoplay();
    assert!(c.state().is_autoplay_enabled);
    assert!(c.display().autoplay);
    assert!(c.state().is_playing);
    assert_eq!(c.state().current_index, 1);
    assert_eq!(c.engine().loads, loads);

    c.toggle_autoplay();
    assert!(!c.state().is_autoplay_enabled);
    assert!(!c.display().autoplay);
}

#[test]
fn track_end_with_autoplay_wraps_and_keeps_playing() {
    let mut c = controller(3);
    c.toggle_autoplay();
    c.select_track(2);

    c.handle_event(EngineEvent::Ended);

    assert_eq!(c.state().current_index, 0);
    assert!(c.state().is_playing);
    assert_eq!(c.display().active, Some(0));
    assert_eq!(c.engine().source.as_deref(), Some("/music/0.mp3"));
}

#[test]
fn track_end_without_autoplay_pauses_in_place() {
    let mut c = controller(3);
    c.select_track(2);
    c.engine_mut().current_time = 180.0;

    c.handle_event(EngineEvent::Ended);

    assert_eq!(c.state().current_index, 2);
    assert!(!c.state().is_playing);
    assert!(!c.display().playing);
    assert_eq!(c.engine().current_time, 180.0);
    assert_eq!(c.engine().loads, 1);
}

#[test]
fn time_update_sets_elapsed_and_fill() {
    let mut c = controller(1);
    c.select_track(0);
    c.engine_mut().duration = Some(200.0);
    c.engine_mut().current_time = 90.7;

    c.handle_event(EngineEvent::TimeUpdate);

    assert_eq!(c.display().elapsed, "1:30");
    assert!((c.display().progress - 0.4535).abs() < 1e-9);
}

#[test]
fn time_update_without_usable_duration_changes_nothing() {
    for duration in [None, Some(0.0), Some(f64::NAN), Some(f64::INFINITY)] {
        let mut c = controller(1);
        c.select_track(0);
        c.engine_mut().duration = duration;
        c.engine_mut().current_time = 12.0;
        let before = c.display().clone();

        c.handle_event(EngineEvent::TimeUpdate);

        assert_eq!(c.display(), &before, "duration {duration:?}");
    }
}

#[test]
fn metadata_loaded_replaces_precomputed_label() {
    let mut c = controller(1);
    c.select_track(0);
    assert_eq!(c.display().duration, "3:00");

    c.engine_mut().duration = Some(245.3);
    c.handle_event(EngineEvent::MetadataLoaded);
    assert_eq!(c.display().duration, "4:05");
}

#[test]
fn metadata_loaded_without_duration_keeps_label() {
    let mut c = controller(1);
    c.select_track(0);
    c.handle_event(EngineEvent::MetadataLoaded);
    assert_eq!(c.display().duration, "3:00");
}
