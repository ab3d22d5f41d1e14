//! # Persisted Cell
//!
//! The one record a store owns, its persisted copy, and the rules that
//! keep the two in step.
//!
//! ## Write Path
//! ```text
//! update(f) / modify(f)
//!    │
//!    ▼
//! writes.lock().await            ← one mutation at a time per store
//!    │
//!    ▼
//! next = current.clone(); f(&mut next)
//!    │
//!    ├── Ok(None) ─────────────────► nothing changed, no write
//!    │
//!    ▼
//! storage.save(key, encode(next))
//!    │
//!    ├── Err ─────────────────────► current untouched, error returned
//!    │
//!    ▼
//! current = next                  ← readers see the new record
//! ```
//!
//! Reads take the `std` lock only, so they stay synchronous.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use super::error::{StateError, StateResult};
use super::storage::{decode, encode, StateStorage};

pub(crate) struct PersistedCell<T> {
    key: &'static str,
    storage: Arc<dyn StateStorage>,
    current: RwLock<T>,
    hydrated: AtomicBool,
    writes: Mutex<()>,
}

impl<T> PersistedCell<T>
where
    T: Clone + Default + Serialize + DeserializeOwned + Send + Sync,
{
    pub(crate) fn new(key: &'static str, storage: Arc<dyn StateStorage>) -> Self {
        PersistedCell {
            key,
            storage,
            current: RwLock::new(T::default()),
            hydrated: AtomicBool::new(false),
            writes: Mutex::new(()),
        }
    }

    pub(crate) fn key(&self) -> &'static str {
        self.key
    }

    pub(crate) fn has_hydrated(&self) -> bool {
        self.hydrated.load(Ordering::Acquire)
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Loads the persisted record, passes it through `normalize`, and makes
    /// it current. Missing or unreadable blobs restore the default.
    pub(crate) async fn hydrate(&self, normalize: impl FnOnce(T) -> T) -> StateResult<()> {
        let _guard = self.writes.lock().await;

        let restored = self
            .storage
            .load(self.key)
            .await?
            .and_then(|raw| decode::<T>(self.key, &raw))
            .unwrap_or_default();

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = normalize(restored);
        self.hydrated.store(true, Ordering::Release);

        debug!(key = %self.key, "State hydrated");
        Ok(())
    }

    /// Applies `f` to a copy of the record, persists the copy, then makes
    /// it current.
    pub(crate) async fn update<R>(
        &self,
        f: impl FnOnce(&mut T) -> StateResult<R>,
    ) -> StateResult<R> {
        let _guard = self.begin().await?;

        let mut next = self.read(T::clone);
        let result = f(&mut next)?;
        self.commit(next).await?;
        Ok(result)
    }

    /// Like [`update`](Self::update), but `Ok(None)` from `f` means nothing
    /// changed and skips the write.
    pub(crate) async fn modify<R>(
        &self,
        f: impl FnOnce(&mut T) -> StateResult<Option<R>>,
    ) -> StateResult<Option<R>> {
        let _guard = self.begin().await?;

        let mut next = self.read(T::clone);
        let Some(result) = f(&mut next)? else {
            return Ok(None);
        };
        self.commit(next).await?;
        Ok(Some(result))
    }

    pub(crate) async fn replace(&self, value: T) -> StateResult<()> {
        self.update(|current| {
            *current = value;
            Ok(())
        })
        .await
    }

    async fn begin(&self) -> StateResult<MutexGuard<'_, ()>> {
        if !self.has_hydrated() {
            return Err(StateError::NotHydrated { key: self.key });
        }
        Ok(self.writes.lock().await)
    }

    async fn commit(&self, next: T) -> StateResult<()> {
        let raw = encode(self.key, &next)?;
        self.storage.save(self.key, &raw).await?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next;

        debug!(key = %self.key, "State persisted");
        Ok(())
    }
}
