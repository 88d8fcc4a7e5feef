//! # Session Storage
//!
//! A tiny string key/value store for the session credentials, with the two
//! well-known keys `accessToken` and `userId`.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    SessionStorage implementations                       │
//! │                                                                         │
//! │  FileStorage                        MemoryStorage                       │
//! │  ───────────                        ─────────────                       │
//! │  JSON object on disk                HashMap in memory                   │
//! │  survives restarts                  tests / --ephemeral                 │
//! │  write-through on every change                                          │
//! │                                                                         │
//! │  SessionStore wraps either one and speaks in `Session` values:          │
//! │    current() ─► Some(Session) only if BOTH keys are present             │
//! │    save()    ─► writes both keys                                        │
//! │    clear()   ─► removes both keys                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use scango_core::Session;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Keys
// =============================================================================

/// Keys the kiosk keeps in session storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    AccessToken,
    UserId,
}

impl StorageKey {
    /// All keys, in the order they are cleared.
    pub const ALL: [StorageKey; 2] = [StorageKey::AccessToken, StorageKey::UserId];

    /// The key name as stored.
    pub const fn as_str(&self) -> &'static str {
        match self {
            StorageKey::AccessToken => "accessToken",
            StorageKey::UserId => "userId",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Storage trait
// =============================================================================

/// String key/value storage.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: StorageKey) -> ClientResult<Option<String>>;
    fn set(&self, key: StorageKey, value: &str) -> ClientResult<()>;
    fn remove(&self, key: StorageKey) -> ClientResult<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> ClientResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| ClientError::Storage("storage lock poisoned".to_string()))
}

// =============================================================================
// Memory backend
// =============================================================================

/// In-memory storage; forgotten when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: StorageKey) -> ClientResult<Option<String>> {
        Ok(lock(&self.values)?.get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> ClientResult<()> {
        lock(&self.values)?.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> ClientResult<()> {
        lock(&self.values)?.remove(&key);
        Ok(())
    }
}

// =============================================================================
// File backend
// =============================================================================

/// Storage persisted as a flat JSON object.
///
/// ```json
/// { "accessToken": "eyJ...", "userId": "17" }
/// ```
///
/// Unknown keys in the file are preserved on write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens (or lazily creates) the storage file at `path`.
    ///
    /// A missing file is an empty store. A corrupt file is also treated as
    /// empty and overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> ClientResult<Self> {
        let path = path.into();
        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ClientError::Storage(format!("{}: {}", path.display(), e)))?;
            match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(e) => {
                    warn!(?path, error = %e, "Session storage file is corrupt, starting empty");
                    BTreeMap::new()
                }
            }
        } else {
            debug!(?path, "Session storage file not found, starting empty");
            BTreeMap::new()
        };

        Ok(FileStorage {
            path,
            values: Mutex::new(values),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::Storage(format!("{}: {}", parent.display(), e)))?;
        }

        let contents = serde_json::to_string_pretty(values)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        std::fs::write(&self.path, contents)
            .map_err(|e| ClientError::Storage(format!("{}: {}", self.path.display(), e)))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: StorageKey) -> ClientResult<Option<String>> {
        Ok(lock(&self.values)?.get(key.as_str()).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> ClientResult<()> {
        let mut values = lock(&self.values)?;
        values.insert(key.as_str().to_string(), value.to_string());
        self.persist(&values)
    }

    fn remove(&self, key: StorageKey) -> ClientResult<()> {
        let mut values = lock(&self.values)?;
        if values.remove(key.as_str()).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }
}

// =============================================================================
// Session store
// =============================================================================

/// Typed view of the session keys over any backend.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SessionStorage>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(backend: Arc<dyn SessionStorage>) -> Self {
        SessionStore { backend }
    }

    /// In-memory store, for tests and ephemeral kiosks.
    pub fn in_memory() -> Self {
        SessionStore::new(Arc::new(MemoryStorage::new()))
    }

    /// The stored session, if both keys are present and non-empty.
    pub fn current(&self) -> ClientResult<Option<Session>> {
        let token = self.backend.get(StorageKey::AccessToken)?;
        let user_id = self.backend.get(StorageKey::UserId)?;

        Ok(match (token, user_id) {
            (Some(access_token), Some(user_id)) if !access_token.is_empty() && !user_id.is_empty() => {
                Some(Session { access_token, user_id })
            }
            _ => None,
        })
    }

    /// The stored session, or [`ClientError::NotAuthenticated`] when there
    /// is none.
    pub fn require(&self) -> ClientResult<Session> {
        self.current()?.ok_or(ClientError::NotAuthenticated)
    }

    /// The stored access token alone.
    pub fn access_token(&self) -> ClientResult<Option<String>> {
        self.backend.get(StorageKey::AccessToken)
    }

    /// Stores both keys of `session`.
    pub fn save(&self, session: &Session) -> ClientResult<()> {
        self.backend.set(StorageKey::AccessToken, &session.access_token)?;
        self.backend.set(StorageKey::UserId, &session.user_id)?;
        debug!(user_id = %session.user_id, "Session stored");
        Ok(())
    }

    /// Removes both keys.
    pub fn clear(&self) -> ClientResult<()> {
        for key in StorageKey::ALL {
            self.backend.remove(key)?;
        }
        debug!("Session cleared");
        Ok(())
    }

    /// Direct access to the backend.
    pub fn backend(&self) -> &dyn SessionStorage {
        self.backend.as_ref()
    }
}
