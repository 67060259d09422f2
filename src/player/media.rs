use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("track has no audio source")]
    NoSource,
    #[error("audio source {0} does not exist")]
    NotFound(PathBuf),
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
}

/// Snapshot of what the media element is doing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaStatus {
    /// A source is bound.
    pub bound: bool,
    pub playing: bool,
    pub position: Duration,
    /// Known once the source has been probed.
    pub duration: Option<Duration>,
    /// The bound source played to its end.
    pub ended: bool,
}

/// A single playback element: one bound source at a time.
pub trait MediaElement {
    /// Bind `source` and start playing it from the beginning.
    fn load(&mut self, source: &Path) -> Result<(), MediaError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);
    /// `volume` is already clamped to `[0, 1]`.
    fn set_volume(&mut self, volume: f32);
    /// Stop and drop whatever is bound.
    fn unload(&mut self);
    fn status(&self) -> MediaStatus;
}
