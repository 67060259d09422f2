use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use crate::player::MediaStatus;

use super::sink::{create_sink_at, fade_out_sink};
use super::types::{AudioCmd, StatusHandle};

const TICK: Duration = Duration::from_millis(200);

struct Engine {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    source: Option<PathBuf>,
    volume: f32,
    status: StatusHandle,
}

pub(super) fn spawn_audio_thread(rx: Receiver<AudioCmd>, status: StatusHandle) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr on drop, which would scribble over the TUI.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                error!("no audio output device, playback is silent: {e}");
                None
            }
        };

        let mut engine = Engine {
            stream,
            sink: None,
            source: None,
            volume: 1.0,
            status,
        };

        loop {
            match rx.recv_timeout(TICK) {
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    engine.quit(fade_out_ms);
                    break;
                }
                Ok(cmd) => engine.handle(cmd),
                Err(RecvTimeoutError::Timeout) => engine.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        debug!("audio thread exiting");
    })
}

impl Engine {
    fn handle(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::Load(path) => self.load(path),
            AudioCmd::Play => {
                let ended = self.sink.as_ref().is_none_or(Sink::empty);
                if ended {
                    // Finished (or never opened): start over like a media element would.
                    if let Some(path) = self.source.clone() {
                        self.load(path);
                    }
                    return;
                }
                if let Some(sink) = &self.sink {
                    sink.play();
                }
                self.update(|s| s.playing = true);
            }
            AudioCmd::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                }
                self.update(|s| s.playing = false);
            }
            AudioCmd::Seek(position) => self.seek(position),
            AudioCmd::SetVolume(volume) => {
                self.volume = volume;
                if let Some(sink) = &self.sink {
                    sink.set_volume(volume);
                }
            }
            AudioCmd::Unload => {
                if let Some(sink) = self.sink.take() {
                    sink.stop();
                }
                self.source = None;
                self.update(|s| *s = MediaStatus::default());
            }
            AudioCmd::Quit { .. } => {}
        }
    }

    fn load(&mut self, path: PathBuf) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        self.sink = self.open_at(&path, Duration::ZERO);
        let opened = match &self.sink {
            Some(sink) => {
                sink.set_volume(self.volume);
                sink.play();
                true
            }
            None => {
                warn!(path = %path.display(), "source could not be opened, marking it ended");
                false
            }
        };
        self.source = Some(path);
        self.update(|s| {
            s.bound = true;
            s.playing = opened;
            s.position = Duration::ZERO;
            s.ended = !opened;
        });
    }

    fn seek(&mut self, position: Duration) {
        let Some(sink) = &self.sink else {
            return;
        };
        if let Err(e) = sink.try_seek(position) {
            // Some decoders cannot seek; rebuild the sink and skip into the file.
            debug!("try_seek failed ({e}); reopening source");
            let was_paused = sink.is_paused();
            sink.stop();
            let Some(path) = self.source.clone() else {
                return;
            };
            self.sink = self.open_at(&path, position);
            match &self.sink {
                Some(sink) => {
                    sink.set_volume(self.volume);
                    if !was_paused {
                        sink.play();
                    }
                }
                None => {
                    self.update(|s| {
                        s.playing = false;
                        s.ended = true;
                    });
                    return;
                }
            }
        }
        self.update(|s| {
            s.position = position;
            s.ended = false;
        });
    }

    fn tick(&mut self) {
        let Some(sink) = &self.sink else {
            return;
        };
        let position = sink.get_pos();
        let ended = sink.empty();
        self.update(|s| {
            if !s.ended {
                s.position = position;
            }
            if ended && !s.ended {
                s.ended = true;
                s.playing = false;
            }
        });
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(sink) = &self.sink {
            if !sink.is_paused() {
                fade_out_sink(sink, fade_out_ms);
            }
            sink.stop();
        }
        self.update(|s| s.playing = false);
    }

    fn open_at(&self, path: &std::path::Path, start_at: Duration) -> Option<Sink> {
        let stream = self.stream.as_ref()?;
        match create_sink_at(stream, path, start_at) {
            Ok(sink) => Some(sink),
            Err(e) => {
                warn!("{e}");
                None
            }
        }
    }

    fn update(&self, f: impl FnOnce(&mut MediaStatus)) {
        if let Ok(mut status) = self.status.lock() {
            f(&mut status);
        }
    }
}
