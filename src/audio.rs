//! Audio output through `rodio`.
//!
//! A dedicated thread owns the output stream and the current `Sink`. The
//! rest of the program talks to it through [`RodioEngine`], which sends
//! [`AudioCmd`]s and reads the [`EngineInfo`] the thread publishes.

mod engine;
mod sink;
mod thread;
mod types;

pub use engine::{EngineEvents, RodioEngine};
pub use types::*;
