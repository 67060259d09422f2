use super::model::{Track, TrackKind};
use super::state::{LibraryState, search_tracks};

/// Which derived list drives the filtered view.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Tab {
    /// The catalog, narrowed by the search query.
    #[default]
    All,
    Favorites,
    /// The playlist overview; shows no tracks until one playlist is opened.
    Playlists,
    /// One opened playlist, by id.
    Playlist(u64),
    Music,
    Podcasts,
}

impl Tab {
    /// Tabs reachable directly from the tab bar, in display order.
    pub const BAR: [Tab; 5] = [
        Tab::All,
        Tab::Favorites,
        Tab::Playlists,
        Tab::Music,
        Tab::Podcasts,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Favorites => "Favorites",
            Tab::Playlists | Tab::Playlist(_) => "Playlists",
            Tab::Music => "Music",
            Tab::Podcasts => "Podcasts",
        }
    }

    /// Whether this tab is highlighted when `active` is the current tab.
    pub fn highlights(self, active: Tab) -> bool {
        match (self, active) {
            (Tab::Playlists, Tab::Playlist(_)) => true,
            _ => self == active,
        }
    }

    /// Compute the tracks this tab shows.
    pub fn view(self, library: &LibraryState) -> Vec<Track> {
        match self {
            Tab::All => search_tracks(library.catalog(), library.query()),
            Tab::Favorites => library.favorites().to_vec(),
            Tab::Playlists => Vec::new(),
            Tab::Playlist(id) => library
                .playlist(id)
                .map(|p| p.tracks.clone())
                .unwrap_or_default(),
            Tab::Music => of_kind(library.catalog(), TrackKind::Music),
            Tab::Podcasts => of_kind(library.catalog(), TrackKind::Podcast),
        }
    }
}

fn of_kind(catalog: &[Track], kind: TrackKind) -> Vec<Track> {
    catalog.iter().filter(|t| t.kind == kind).cloned().collect()
}
