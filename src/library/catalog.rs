use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::model::Track;

/// Message shown in place of the player when the catalog cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load tracks. Try again later.";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch catalog {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("catalog request to {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("catalog is not a list of tracks: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the startup catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            CatalogSource::Url(raw.to_string())
        } else {
            CatalogSource::File(PathBuf::from(raw))
        }
    }

    /// Directory relative media references resolve against, when the
    /// catalog is a local file.
    pub fn base_dir(&self) -> Option<&Path> {
        match self {
            CatalogSource::File(path) => path.parent(),
            CatalogSource::Url(_) => None,
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => f.write_str(url),
        }
    }
}

/// Read the track catalog. One attempt, no retry.
pub fn load_catalog(source: &CatalogSource) -> Result<Vec<Track>, CatalogError> {
    let text = match source {
        CatalogSource::File(path) => fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?,
        CatalogSource::Url(url) => fetch(url)?,
    };

    let tracks: Vec<Track> = serde_json::from_str(&text)?;
    info!(count = tracks.len(), %source, "loaded catalog");
    Ok(tracks)
}

fn fetch(url: &str) -> Result<String, CatalogError> {
    let fetch_err = |source| CatalogError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = reqwest::blocking::get(url).map_err(fetch_err)?;
    if !response.status().is_success() {
        return Err(CatalogError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    response.text().map_err(fetch_err)
}

/// Turn a media reference from the catalog into a local path.
///
/// Catalog references are often site-rooted (`/audio/song.mp3`). When such a
/// path does not exist on its own it is looked up under `media_root` instead.
pub fn resolve_media(reference: &str, media_root: Option<&Path>) -> PathBuf {
    let raw = reference.strip_prefix("file://").unwrap_or(reference);
    let path = Path::new(raw);

    match media_root {
        Some(root) if path.is_relative() => root.join(path),
        Some(root) if !path.exists() => {
            let relative: PathBuf = path.components().skip(1).collect();
            root.join(relative)
        }
        _ => path.to_path_buf(),
    }
}
