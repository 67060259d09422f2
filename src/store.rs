//! Persistent key-value storage.
//!
//! Everything the player remembers between sessions (credentials, favorites,
//! recents, playlists, profile fields) lives in one string-keyed store that is
//! flushed to a JSON document on every write. Typed accessors layered on top
//! deserialize JSON-valued entries and fall back to defaults when an entry is
//! missing or malformed.

mod error;
pub mod keys;
mod kv;

pub use error::StoreError;
pub use kv::KvStore;

#[cfg(test)]
mod tests;
