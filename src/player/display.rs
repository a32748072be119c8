use super::state::VolumeIcon;

/// Visual indicators the controller pushes updates to.
///
/// The controller never reads these back; implementations only need to store
/// or render what they receive.
pub trait DisplaySurface {
    fn set_title(&mut self, title: &str);
    fn set_artist(&mut self, artist: &str);
    fn set_elapsed(&mut self, label: &str);
    fn set_duration(&mut self, label: &str);
    /// Progress bar fill, in `[0, 1]`.
    fn set_progress(&mut self, fraction: f64);
    /// Volume bar fill, in `[0, 1]`.
    fn set_volume_level(&mut self, volume: f64);
    fn set_volume_icon(&mut self, icon: VolumeIcon);
    fn set_autoplay(&mut self, enabled: bool);
    /// Highlight the playlist row at `index`, clearing any other highlight.
    fn set_active_track(&mut self, index: Option<usize>);
    /// Switch the play/pause button between its two faces.
    fn set_playing(&mut self, playing: bool);
}
