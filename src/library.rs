//! Track library: catalog loading, derived views and the user's collections.
//!
//! `LibraryState` is the source of truth for everything the player view shows.
//! The active [`Tab`] decides which derived list becomes the filtered view;
//! favorites, recents and playlists are written back to the store whenever
//! they change.

mod catalog;
mod model;
mod state;
mod tab;

pub use catalog::*;
pub use model::*;
pub use state::*;
pub use tab::Tab;

#[cfg(test)]
mod tests;
