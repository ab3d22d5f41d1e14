//! # State Storage
//!
//! Where the stores keep their blobs. Production uses the SQLite
//! `client_state` table; tests use an in-memory map that can be told to
//! fail writes.
//!
//! ## Blob Format
//! ```text
//! key: "netcom:cards"
//! value: { "version": 1, "state": [ {card}, {card} ] }
//!             │                │
//!             │                └── the store's record, serde JSON
//!             └── bumped when the record shape changes; a mismatch is
//!                 logged and the store starts from its default
//! ```

use async_trait::async_trait;
use netcom_db::ClientStateRepository;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

use super::error::{StateError, StateResult};

/// Current persisted record version for every store.
pub const STATE_VERSION: u32 = 1;

/// Key/value persistence behind the stores.
#[async_trait]
pub trait StateStorage: Send + Sync {
    async fn load(&self, key: &str) -> StateResult<Option<String>>;
    async fn save(&self, key: &str, value: &str) -> StateResult<()>;
    async fn remove(&self, key: &str) -> StateResult<()>;
}

// =============================================================================
// Envelope
// =============================================================================

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    state: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    state: T,
}

/// Wraps `state` as `{ "version": 1, "state": ... }`.
pub fn encode<T: Serialize>(key: &str, state: &T) -> StateResult<String> {
    serde_json::to_string(&EnvelopeRef {
        version: STATE_VERSION,
        state,
    })
    .map_err(|e| StateError::Encode {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Unwraps a persisted blob. Unreadable or outdated blobs yield `None` so
/// the store falls back to its default instead of refusing to start.
pub fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str::<Envelope<T>>(raw) {
        Ok(envelope) if envelope.version == STATE_VERSION => Some(envelope.state),
        Ok(envelope) => {
            warn!(key = %key, version = envelope.version, "Discarding state with unknown version");
            None
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Discarding unreadable state");
            None
        }
    }
}

// =============================================================================
// SQLite
// =============================================================================

/// Storage over the `client_state` table.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    repo: ClientStateRepository,
}

impl SqliteStorage {
    pub fn new(repo: ClientStateRepository) -> Self {
        SqliteStorage { repo }
    }
}

#[async_trait]
impl StateStorage for SqliteStorage {
    async fn load(&self, key: &str) -> StateResult<Option<String>> {
        Ok(self.repo.get(key).await?)
    }

    async fn save(&self, key: &str, value: &str) -> StateResult<()> {
        Ok(self.repo.put(key, value).await?)
    }

    async fn remove(&self, key: &str) -> StateResult<()> {
        self.repo.delete(key).await?;
        Ok(())
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// Map-backed storage. Counts writes so callers can assert that a no-op
/// did not touch storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later `save`/`remove` fail until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_writable(&self) -> StateResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StateError::Unavailable("writes disabled".to_string()));
        }
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

#[async_trait]
impl StateStorage for MemoryStorage {
    async fn load(&self, key: &str) -> StateResult<Option<String>> {
        Ok(self.raw(key))
    }

    async fn save(&self, key: &str, value: &str) -> StateResult<()> {
        self.check_writable()?;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StateResult<()> {
        self.check_writable()?;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
