use crate::shared::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Scope shared by every plugin (catalogs, version indices)
pub const SHARED_SCOPE: &str = ".";

/// A named, path-scoped unit of durable data
///
/// `(path, key)` uniquely identifies the storage location. A path of `.`
/// means the root of the store; a plugin name means that plugin's private
/// scope.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    path: PathBuf,
    key: String,
    payload: T,
}

impl<T> CacheEntry<T> {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>, payload: T) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
            payload,
        }
    }

    /// Entry in the shared scope
    pub fn shared(key: impl Into<String>, payload: T) -> Self {
        Self::new(SHARED_SCOPE, key, payload)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// CacheStore port for durable get/put of typed payloads
///
/// Every remote dataset follows the same "get; if absent, download; put;
/// return" sequence through this port.
///
/// Implementations must be `Send + Sync`: the shared scope is used by all
/// workers at once, and concurrent writers to the same location must be
/// serialised (last writer wins).
pub trait CacheStore: Send + Sync {
    /// Reads the payload stored at `(path, key)`
    ///
    /// # Returns
    /// `None` when nothing is stored there
    ///
    /// # Errors
    /// Returns `ModernizerError::CacheCorrupted` when a stored payload
    /// cannot be read or deserialized as `T`, and a security error when
    /// `path` or `key` would escape the managed root.
    fn get<T: DeserializeOwned>(&self, path: &Path, key: &str) -> Result<Option<T>>;

    /// Persists the entry, overwriting any previous value and creating
    /// intermediate locations as needed
    fn put<T: Serialize>(&self, entry: &CacheEntry<T>) -> Result<()>;

    /// Deletes everything under the managed root
    fn wipe(&self) -> Result<()>;
}
