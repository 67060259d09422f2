use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::player::{MediaElement, MediaError, MediaStatus};

use super::engine::spawn_audio_thread;
use super::sink::probe_duration;
use super::types::{AudioCmd, StatusHandle};

pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    status: StatusHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let status: StatusHandle = Arc::new(Mutex::new(MediaStatus::default()));
        let join = spawn_audio_thread(rx, status.clone());

        Self {
            tx,
            status,
            join: Mutex::new(Some(join)),
        }
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    /// Fade out, stop the audio thread and wait for it to finish.
    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaElement for AudioPlayer {
    fn load(&mut self, source: &Path) -> Result<(), MediaError> {
        if !source.is_file() {
            return Err(MediaError::NotFound(source.to_path_buf()));
        }

        let duration = probe_duration(source);
        if let Ok(mut status) = self.status.lock() {
            *status = MediaStatus {
                bound: true,
                playing: true,
                position: Duration::ZERO,
                duration,
                ended: false,
            };
        }

        self.send(AudioCmd::Load(source.to_path_buf()))
            .map_err(|_| MediaError::Unavailable("audio thread has stopped".to_string()))
    }

    fn play(&mut self) {
        // The engine restarts an ended source; clear the flag now so the next
        // refresh does not see the stale end.
        if let Ok(mut status) = self.status.lock() {
            if status.bound && status.ended {
                status.ended = false;
                status.position = Duration::ZERO;
            }
        }
        let _ = self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        let _ = self.send(AudioCmd::Pause);
    }

    fn seek(&mut self, position: Duration) {
        let _ = self.send(AudioCmd::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.send(AudioCmd::SetVolume(volume));
    }

    fn unload(&mut self) {
        if let Ok(mut status) = self.status.lock() {
            *status = MediaStatus::default();
        }
        let _ = self.send(AudioCmd::Unload);
    }

    fn status(&self) -> MediaStatus {
        self.status
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}
