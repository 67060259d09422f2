//! Playback control.
//!
//! [`PlaybackController`] owns the single media element and the track
//! carousel. It binds the selected track, toggles play/pause, clamps seek and
//! volume input, and steps the carousel. The media element is a trait so the
//! audio engine can be swapped for a fake in tests.

mod controller;
mod media;

pub use controller::*;
pub use media::*;
