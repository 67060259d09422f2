use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::carousel::{DEFAULT_TRANSITION_LOCK, DEFAULT_WINDOW};
use crate::library::DEFAULT_RECENTS_LIMIT;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playdeck/config.toml` or `~/.config/playdeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub catalog: CatalogSettings,
    pub player: PlayerSettings,
    pub profile: ProfileSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Store file. Defaults to `storage.json` in the data directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Where the track catalog is read from: a JSON file path or an
    /// `http(s)://` URL. The first command-line argument overrides it.
    pub source: String,
    /// Directory that site-rooted media references (`/audio/x.mp3`) are
    /// resolved against. Defaults to the catalog file's directory.
    pub media_root: Option<PathBuf>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            source: "data/tracks.json".to_string(),
            media_root: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Tracks visible in the carousel at once.
    pub carousel_window: usize,
    /// How long a carousel step blocks further steps (milliseconds).
    pub transition_lock_ms: u64,
    /// Length of the recently played list.
    pub recents_limit: usize,
    /// Starting volume in `[0, 1]`.
    pub default_volume: f32,
    /// Seconds to scrub when pressing `H` / `L`.
    pub seek_step_seconds: u64,
    pub volume_step: f32,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            carousel_window: DEFAULT_WINDOW,
            transition_lock_ms: DEFAULT_TRANSITION_LOCK.as_millis() as u64,
            recents_limit: DEFAULT_RECENTS_LIMIT,
            default_volume: 1.0,
            seek_step_seconds: 5,
            volume_step: 0.1,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfileSettings {
    /// Receives the profile as a JSON `POST` on save.
    pub endpoint: String,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/update-profile".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether the track info panel starts open.
    pub show_track_info: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ playdeck ~ ".to_string(),
            show_track_info: true,
        }
    }
}
