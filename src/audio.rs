//! `rodio` audio engine.
//!
//! Decoding and output run on a dedicated thread driven by [`AudioCmd`]s; the
//! UI side holds an [`AudioPlayer`], which implements
//! [`MediaElement`](crate::player::MediaElement) and reads a shared status
//! snapshot the thread keeps current.

mod engine;
mod player;
mod sink;
mod types;

pub use player::AudioPlayer;
pub use types::*;
