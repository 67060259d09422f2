use serde::{Deserialize, Serialize};

/// Broad category of a catalog entry; drives the `Music` / `Podcasts` tabs.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    #[default]
    Music,
    Podcast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: u64,
    pub title: String,
    pub artist: String,
    /// Image reference (path or URL).
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub description: String,
    /// Media reference (path or URL) handed to the player.
    #[serde(default)]
    pub audio: String,
    #[serde(default)]
    pub kind: TrackKind,
}

impl Track {
    /// `Artist - Title`, or just the title when there is no artist.
    pub fn display(&self) -> String {
        match self.artist.trim() {
            "" => self.title.clone(),
            artist => format!("{} - {}", artist, self.title),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
}
