//! Player module: the controller that keeps playback and display in sync.
//!
//! `PlayerController` owns the playlist position, the play/autoplay flags and
//! the volume, and is wired to a `PlaybackEngine` and a `DisplaySurface`
//! supplied by the caller.

mod controller;
mod display;
mod engine;
mod state;
mod time;

pub use controller::*;
pub use display::*;
pub use engine::*;
pub use state::*;
pub use time::*;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;
