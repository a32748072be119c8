use crate::mpris::{MprisHandle, PlaybackStatus};
use crate::player::{DisplaySurface, PlaybackEngine, PlayerController};

/// What MPRIS last heard about: loaded index and playback status.
pub type MprisSnapshot = (Option<usize>, PlaybackStatus);

/// Push controller state to MPRIS. Metadata is only rebuilt when the loaded
/// track or status changed since `last`; timing and volume always refresh.
pub fn update_mpris<E: PlaybackEngine, D: DisplaySurface>(
    mpris: &MprisHandle,
    controller: &PlayerController<E, D>,
    last: &mut Option<MprisSnapshot>,
) {
    let state = controller.state();
    let index = controller.has_source().then_some(state.current_index);
    let status = PlaybackStatus::from_flags(controller.has_source(), state.is_playing);

    let snapshot = (index, status);
    if last.as_ref() != Some(&snapshot) {
        mpris.set_track_metadata(index, controller.current_track());
        mpris.set_playback(status);
        *last = Some(snapshot);
    }

    let engine = controller.engine();
    mpris.set_timing(engine.current_time(), engine.duration());
    mpris.set_volume(state.volume);
}
