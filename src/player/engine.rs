/// Handle to the component that actually decodes and outputs audio.
///
/// Times are in seconds. `duration` is `None` until the engine has read the
/// stream's metadata.
pub trait PlaybackEngine {
    fn set_source(&mut self, locator: &str);
    fn source(&self) -> Option<&str>;
    /// Ask the engine to (re)open the current source from position zero.
    fn load(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    fn duration(&self) -> Option<f64>;
    fn set_volume(&mut self, volume: f64);
}

/// Notifications emitted by a playback engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Playback position advanced (fires repeatedly while playing).
    TimeUpdate,
    /// The stream duration became known.
    MetadataLoaded,
    /// The current source played to its end.
    Ended,
}
