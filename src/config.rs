//! Settings for playback defaults, the audio thread, controls, the UI, library
//! scanning and logging, plus the loader that layers file and environment.

mod load;
mod schema;

pub use schema::*;
