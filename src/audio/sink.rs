//! Opening `rodio` sinks and probing sources.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::*;
use rodio::{Decoder, OutputStream, Sink, Source};
use thiserror::Error;

#[derive(Debug, Error)]
pub(super) enum SinkError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Create a paused `Sink` for `path` that starts at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<Sink, SinkError> {
    let file = File::open(path).map_err(|source| SinkError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|source| SinkError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        // `skip_duration` doubles as the fallback seek; zero is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

/// Read the duration from the file's headers, when it has any.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    Some(tagged.properties().duration()).filter(|d| !d.is_zero())
}

/// Ramp the volume of `sink` down to zero over `fade_out_ms`.
pub(super) fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    let start = sink.volume();
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(start * (1.0 - t));
        std::thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
