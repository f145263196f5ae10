use crate::ports::outbound::{CacheEntry, CacheStore};
use crate::shared::error::ModernizerError;
use crate::shared::security::{validate_cache_key, validate_scope_path};
use crate::shared::Result;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// FileCacheStore adapter persisting cache entries as JSON files
///
/// Each entry lives at `<root>/<path>/<key>`; the `.` path is the root
/// itself. Writes go to a temporary file in the target directory which is
/// then renamed over the destination, so readers never observe a partial
/// payload. Writers to the same location are serialised by a per-file
/// lock; the last writer wins.
pub struct FileCacheStore {
    root: PathBuf,
    locks: DashMap<PathBuf, Arc<Mutex<()>>>,
}

impl FileCacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: DashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk file for `(path, key)`
    ///
    /// # Errors
    /// Returns a security error when the path or key would escape the root.
    pub fn location(&self, path: &Path, key: &str) -> Result<PathBuf> {
        validate_scope_path(path)?;
        validate_cache_key(key)?;

        let mut location = self.root.clone();
        for component in path.components() {
            if let Component::Normal(segment) = component {
                location.push(segment);
            }
        }
        location.push(key);
        Ok(location)
    }

    fn lock_for(&self, location: &Path) -> Arc<Mutex<()>> {
        self.locks
            .entry(location.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn write_atomically(location: &Path, bytes: &[u8]) -> io::Result<()> {
        let parent = location
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no parent directory"))?;
        fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(bytes)?;
        temp.flush()?;
        temp.persist(location).map_err(|e| e.error)?;
        Ok(())
    }
}

impl CacheStore for FileCacheStore {
    fn get<T: DeserializeOwned>(&self, path: &Path, key: &str) -> Result<Option<T>> {
        let location = self.location(path, key)?;

        let bytes = match fs::read(&location) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(location = %location.display(), "cache miss");
                return Ok(None);
            }
            Err(e) => {
                return Err(ModernizerError::CacheCorrupted {
                    path: path.to_path_buf(),
                    key: key.to_string(),
                    details: e.to_string(),
                }
                .into())
            }
        };

        let payload = serde_json::from_slice(&bytes).map_err(|e| ModernizerError::CacheCorrupted {
            path: path.to_path_buf(),
            key: key.to_string(),
            details: e.to_string(),
        })?;

        debug!(location = %location.display(), "cache hit");
        Ok(Some(payload))
    }

    fn put<T: Serialize>(&self, entry: &CacheEntry<T>) -> Result<()> {
        let location = self.location(entry.path(), entry.key())?;
        let bytes = serde_json::to_vec_pretty(entry.payload())?;

        let lock = self.lock_for(&location);
        let _guard = match lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        Self::write_atomically(&location, &bytes).map_err(|e| ModernizerError::FileWriteError {
            path: location.clone(),
            details: e.to_string(),
        })?;

        debug!(location = %location.display(), bytes = bytes.len(), "cache entry written");
        Ok(())
    }

    fn wipe(&self) -> Result<()> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(ModernizerError::FileWriteError {
                    path: self.root.clone(),
                    details: e.to_string(),
                }
                .into())
            }
        };

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            let removed = if entry.file_type()?.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            removed.map_err(|e| ModernizerError::FileWriteError {
                path: path.clone(),
                details: e.to_string(),
            })?;
        }

        info!(root = %self.root.display(), "cache wiped");
        Ok(())
    }
}
