use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::StoreError;

/// String-keyed, string-valued store persisted as a single JSON object.
///
/// A store opened with [`KvStore::in_memory`] never touches the disk; every
/// other store rewrites its file after each mutation (temp file + rename, so a
/// crash mid-write leaves the previous contents intact).
#[derive(Debug, Default)]
pub struct KvStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl KvStore {
    /// Open the store at `path`. A missing or empty file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        debug!(path = %path.display(), entries = entries.len(), "opened store");
        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// Open the store at `path`, moving an unreadable document aside to
    /// `<path>.bak` and starting empty instead of failing.
    pub fn open_or_reset(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        match Self::open(&path) {
            Err(StoreError::Corrupt { source, .. }) => {
                let backup = path.with_extension("json.bak");
                warn!(
                    path = %path.display(),
                    backup = %backup.display(),
                    "store is corrupt ({source}); starting empty"
                );
                fs::rename(&path, &backup).map_err(|source| StoreError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(Self {
                    path: Some(path),
                    entries: BTreeMap::new(),
                })
            }
            other => other,
        }
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.into());
        self.flush()
    }

    /// Write several entries with a single flush. If the flush fails the
    /// in-memory entries are rolled back too, so neither side holds half a record.
    pub fn set_many<'a, V: Into<String>>(
        &mut self,
        pairs: impl IntoIterator<Item = (&'a str, V)>,
    ) -> Result<(), StoreError> {
        let before = self.entries.clone();
        for (key, value) in pairs {
            self.entries.insert(key.to_string(), value.into());
        }
        if let Err(e) = self.flush() {
            self.entries = before;
            return Err(e);
        }
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    /// `true` iff the entry holds exactly `"true"`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    pub fn set_flag(&mut self, key: &str, value: bool) -> Result<(), StoreError> {
        self.set(key, value.to_string())
    }

    /// Decode a JSON-valued entry. `Ok(None)` when the key is absent.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        serde_json::from_str(raw)
            .map(Some)
            .map_err(|source| StoreError::Malformed {
                key: key.to_string(),
                source,
            })
    }

    /// Decode a JSON-valued entry, using `T::default()` when it is absent or malformed.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.get_json(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                warn!("{e}; using default");
                T::default()
            }
        }
    }

    /// Encode `value` as JSON and store it under `key`.
    pub fn set_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.set(key, text)
    }

    fn flush(&self) -> Result<(), StoreError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let text = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            StoreError::Encode {
                key: "*".to_string(),
                source,
            }
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        Ok(())
    }
}
