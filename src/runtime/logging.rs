use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "playdeck.log";

/// Send `tracing` output to `playdeck.log` in `data_dir`. The terminal belongs
/// to the TUI, so nothing is logged when there is no data directory.
pub fn init(data_dir: Option<&Path>) -> std::io::Result<Option<PathBuf>> {
    let Some(dir) = data_dir else {
        return Ok(None);
    };
    fs::create_dir_all(dir)?;
    let log_path = dir.join(LOG_FILE);
    let log_file = OpenOptions::new().create(true).append(true).open(&log_path)?;

    // RUST_LOG overrides; HTTP client internals stay quiet by default.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper_util=warn,reqwest=warn,hyper=warn"));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    Ok(Some(log_path))
}
