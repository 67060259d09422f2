use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::store::{KvStore, StoreError, keys};

use super::catalog::{CatalogError, LOAD_FAILED_MESSAGE};
use super::model::{Playlist, Track, TrackKind};
use super::tab::Tab;

pub const DEFAULT_RECENTS_LIMIT: usize = 5;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A track the user adds from local files during this session.
#[derive(Debug, Clone, Default)]
pub struct NewTrack {
    pub title: String,
    pub artist: String,
    pub cover: Option<PathBuf>,
    pub audio: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct LibraryState {
    catalog: Vec<Track>,
    filtered: Vec<Track>,
    favorites: Vec<Track>,
    recents: Vec<Track>,
    playlists: Vec<Playlist>,
    tab: Tab,
    query: String,
    recents_limit: usize,
    load_error: Option<String>,
}

impl LibraryState {
    /// A library over `catalog` with no saved collections.
    pub fn new(catalog: Vec<Track>, recents_limit: usize) -> Self {
        let mut state = Self {
            catalog,
            filtered: Vec::new(),
            favorites: Vec::new(),
            recents: Vec::new(),
            playlists: Vec::new(),
            tab: Tab::All,
            query: String::new(),
            recents_limit: recents_limit.max(1),
            load_error: None,
        };
        state.filtered = state.tab.view(&state);
        state
    }

    /// Build the startup library from the catalog load result and whatever
    /// collections the store holds.
    ///
    /// The filtered-view snapshot under `tracks` is not read back; the loaded
    /// catalog is authoritative.
    pub fn restore(
        store: &KvStore,
        catalog: Result<Vec<Track>, CatalogError>,
        recents_limit: usize,
    ) -> Self {
        let (catalog, load_error) = match catalog {
            Ok(tracks) => (tracks, None),
            Err(e) => {
                error!("catalog load failed: {e}");
                (Vec::new(), Some(LOAD_FAILED_MESSAGE.to_string()))
            }
        };

        let mut state = Self::new(catalog, recents_limit);
        state.load_error = load_error;

        state.favorites = dedup_by_id(store.load_or_default(keys::FAVORITE_TRACKS));
        state.playlists = store.load_or_default(keys::PLAYLISTS);
        state.recents = dedup_by_id(store.load_or_default(keys::RECENT_TRACKS));
        state.recents.truncate(state.recents_limit);

        debug!(
            favorites = state.favorites.len(),
            recents = state.recents.len(),
            playlists = state.playlists.len(),
            "restored library collections"
        );
        state
    }

    pub fn catalog(&self) -> &[Track] {
        &self.catalog
    }

    pub fn filtered(&self) -> &[Track] {
        &self.filtered
    }

    pub fn favorites(&self) -> &[Track] {
        &self.favorites
    }

    pub fn recents(&self) -> &[Track] {
        &self.recents
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn playlist(&self, id: u64) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.favorites.iter().any(|t| t.id == id)
    }

    /// Update the search query. Typing always brings the view back to `All`.
    pub fn search(&mut self, query: &str, store: &mut KvStore) -> Result<(), StoreError> {
        self.query = query.to_string();
        self.tab = Tab::All;
        self.refresh(store)
    }

    pub fn select_tab(&mut self, tab: Tab, store: &mut KvStore) -> Result<(), StoreError> {
        debug!(?tab, "tab selected");
        self.tab = tab;
        self.refresh(store)
    }

    /// Open a playlist. Returns `false` when no playlist has that id.
    pub fn select_playlist(&mut self, id: u64, store: &mut KvStore) -> Result<bool, StoreError> {
        if self.playlist(id).is_none() {
            return Ok(false);
        }
        self.select_tab(Tab::Playlist(id), store)?;
        Ok(true)
    }

    /// Add or remove `track` from favorites. Returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, track: &Track, store: &mut KvStore) -> Result<bool, StoreError> {
        let now_favorite = if let Some(pos) = self.favorites.iter().position(|t| t.id == track.id) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(track.clone());
            true
        };
        store.set_json(keys::FAVORITE_TRACKS, &self.favorites)?;

        if self.tab == Tab::Favorites {
            self.refresh(store)?;
        }
        Ok(now_favorite)
    }

    /// Move `track` to the front of recents, dropping older copies and
    /// anything past the limit.
    pub fn add_recently_played(&mut self, track: &Track, store: &mut KvStore) -> Result<(), StoreError> {
        self.recents.retain(|t| t.id != track.id);
        self.recents.insert(0, track.clone());
        self.recents.truncate(self.recents_limit);
        store.set_json(keys::RECENT_TRACKS, &self.recents)
    }

    /// Append a user-supplied track to the filtered view.
    ///
    /// The track is not added to the catalog, so the next view change drops it.
    pub fn add_user_track(&mut self, upload: NewTrack, store: &mut KvStore) -> Result<Track, LibraryError> {
        let title = upload.title.trim();
        let artist = upload.artist.trim();
        if title.is_empty() {
            return Err(LibraryError::MissingField("title"));
        }
        if artist.is_empty() {
            return Err(LibraryError::MissingField("artist"));
        }

        let mut id = chrono::Utc::now().timestamp_millis().max(0) as u64;
        while self.filtered.iter().chain(&self.catalog).any(|t| t.id == id) {
            id += 1;
        }

        let media_ref = |p: Option<PathBuf>| p.map(|p| p.display().to_string()).unwrap_or_default();
        let track = Track {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            cover: media_ref(upload.cover),
            description: "User uploaded".to_string(),
            audio: media_ref(upload.audio),
            kind: TrackKind::Music,
        };

        info!(id, title = %track.title, "added user track");
        self.filtered.push(track.clone());
        self.persist_view(store)?;
        Ok(track)
    }

    fn refresh(&mut self, store: &mut KvStore) -> Result<(), StoreError> {
        self.filtered = self.tab.view(self);
        self.persist_view(store)
    }

    fn persist_view(&self, store: &mut KvStore) -> Result<(), StoreError> {
        store.set_json(keys::TRACKS, &self.filtered)
    }
}

/// Case-insensitive substring match on titles. An empty query keeps everything.
pub fn search_tracks(catalog: &[Track], query: &str) -> Vec<Track> {
    if query.is_empty() {
        return catalog.to_vec();
    }
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|t| t.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Keep the first occurrence of every id.
fn dedup_by_id(mut tracks: Vec<Track>) -> Vec<Track> {
    let mut seen = HashSet::new();
    tracks.retain(|t| seen.insert(t.id));
    tracks
}
