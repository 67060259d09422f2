use tracing::{info, warn};

use crate::config;

pub fn load_settings() -> config::Settings {
    let settings = match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                warn!("invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            warn!("failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    };

    match config::Settings::default().write_default_if_missing() {
        Ok(Some(path)) => info!(path = %path.display(), "wrote default config"),
        Ok(None) => {}
        Err(e) => warn!("could not write default config: {e}"),
    }
    settings
}
