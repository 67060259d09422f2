use std::{env, fs, io, path::PathBuf};

use super::schema::Settings;

const APP_DIR: &str = "playdeck";

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `PLAYDECK__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("PLAYDECK")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.player.carousel_window == 0 {
            return Err("player.carousel_window must be >= 1".to_string());
        }
        if self.player.recents_limit == 0 {
            return Err("player.recents_limit must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.player.default_volume) {
            return Err("player.default_volume must be within 0.0..=1.0".to_string());
        }
        if self.catalog.source.trim().is_empty() {
            return Err("catalog.source must not be empty".to_string());
        }
        Ok(())
    }

    /// Write these settings to the resolved config path unless a file is
    /// already there. Returns the path when a file was written.
    pub fn write_default_if_missing(&self) -> io::Result<Option<PathBuf>> {
        let Some(path) = resolve_config_path() else {
            return Ok(None);
        };
        if path.exists() {
            return Ok(None);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&path, content)?;
        Ok(Some(path))
    }

    /// The store file: `storage.path` when set, else `storage.json` in the data dir.
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage
            .path
            .clone()
            .or_else(|| data_dir().map(|d| d.join("storage.json")))
    }
}

/// Resolve the config path from `PLAYDECK_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("PLAYDECK_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/playdeck/config.toml`
/// or `~/.config/playdeck/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join(APP_DIR).join("config.toml"))
}

/// `$XDG_DATA_HOME/playdeck` or `~/.local/share/playdeck`.
pub fn data_dir() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
    };

    data_home.map(|d| d.join(APP_DIR))
}
