//! Commands and shared handles used by the audio engine.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::player::MediaStatus;

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the bound source and start it from the beginning.
    Load(PathBuf),
    /// Resume; restarts the source when it has already ended.
    Play,
    Pause,
    Seek(Duration),
    SetVolume(f32),
    /// Stop and drop the bound source.
    Unload,
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

pub type StatusHandle = Arc<Mutex<MediaStatus>>;
