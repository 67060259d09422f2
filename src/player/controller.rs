use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::carousel::Carousel;
use crate::library::{Track, resolve_media};

use super::media::{MediaElement, MediaError};

/// The playback state of the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

pub struct PlaybackController<M> {
    media: M,
    carousel: Carousel,
    active: Option<Track>,
    state: PlaybackState,
    volume: f32,
    position: Duration,
    duration: Duration,
    media_root: Option<PathBuf>,
}

impl<M: MediaElement> PlaybackController<M> {
    pub fn new(mut media: M, carousel: Carousel, volume: f32, media_root: Option<PathBuf>) -> Self {
        let volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        media.set_volume(volume);
        Self {
            media,
            carousel,
            active: None,
            state: PlaybackState::Stopped,
            volume,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            media_root,
        }
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    #[cfg(test)]
    pub(crate) fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    pub fn active(&self) -> Option<&Track> {
        self.active.as_ref()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Make `track` the active track, bind its audio and start playback.
    ///
    /// The track stays active even when binding fails so the UI can show what
    /// was attempted. A failed bind leaves the media element unbound.
    pub fn select(&mut self, track: &Track) -> Result<(), MediaError> {
        self.active = Some(track.clone());
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.state = PlaybackState::Stopped;

        let source = match self.bind(track) {
            Ok(source) => source,
            Err(e) => {
                self.media.unload();
                return Err(e);
            }
        };
        self.media.set_volume(self.volume);
        self.state = PlaybackState::Playing;
        info!(id = track.id, source = %source.display(), "playing");
        Ok(())
    }

    fn bind(&mut self, track: &Track) -> Result<PathBuf, MediaError> {
        if track.audio.trim().is_empty() {
            return Err(MediaError::NoSource);
        }
        let source = resolve_media(&track.audio, self.media_root.as_deref());
        self.media.load(&source)?;
        Ok(source)
    }

    /// Pause when playing, play otherwise. Nothing happens without a bound source.
    pub fn toggle_play_pause(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => self.play(),
        }
    }

    pub fn play(&mut self) {
        if !self.media.status().bound {
            return;
        }
        self.media.play();
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        if !self.media.status().bound || self.state != PlaybackState::Playing {
            return;
        }
        self.media.pause();
        self.state = PlaybackState::Paused;
    }

    /// Jump to `seconds`, clamped to `[0, duration]`.
    pub fn seek(&mut self, seconds: f64) {
        if !self.media.status().bound {
            return;
        }
        let max = self.duration.as_secs_f64();
        let target = if seconds.is_finite() {
            seconds.clamp(0.0, max)
        } else {
            0.0
        };
        let position = Duration::from_secs_f64(target);
        self.media.seek(position);
        self.position = position;
        debug!(?position, "seek");
    }

    pub fn seek_by(&mut self, delta_seconds: f64) {
        self.seek(self.position.as_secs_f64() + delta_seconds);
    }

    /// Set the volume, clamped to `[0, 1]`. Non-finite input is ignored.
    pub fn set_volume(&mut self, volume: f32) {
        if !volume.is_finite() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
        self.media.set_volume(self.volume);
    }

    pub fn adjust_volume(&mut self, delta: f32) {
        self.set_volume(self.volume + delta);
    }

    /// Step the carousel forward over a view of `len` tracks.
    pub fn next(&mut self, len: usize, now: Instant) -> bool {
        self.carousel.next(len, now)
    }

    /// Step the carousel back over a view of `len` tracks.
    pub fn previous(&mut self, len: usize, now: Instant) -> bool {
        self.carousel.previous(len, now)
    }

    /// Pull position, duration and end-of-media from the media element.
    pub fn refresh(&mut self) {
        let status = self.media.status();
        if !status.bound {
            return;
        }
        if let Some(d) = status.duration {
            self.duration = d;
        }
        self.position = if self.duration.is_zero() {
            status.position
        } else {
            status.position.min(self.duration)
        };
        if status.ended && self.state == PlaybackState::Playing {
            debug!("reached end of track");
            self.state = PlaybackState::Stopped;
        }
    }
}

/// `m:ss`, as shown beside the progress bar.
pub fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
