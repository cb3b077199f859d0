//! HTTP Handlers

mod audio;
mod ping;

pub use audio::*;
pub use ping::*;
