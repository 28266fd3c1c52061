//! In-memory backend
//!
//! Keeps the serialized JSON text rather than the value itself, so a
//! round trip through [`MemoryStore`] behaves like a round trip through a
//! file, and tests can seed it with a corrupt document.

use crate::error::{Result, StoreError};
use crate::Store;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Mutex;

/// A [`Store`] holding its document in memory.
#[derive(Debug)]
pub struct MemoryStore<T> {
    document: Mutex<Option<String>>,
    saves: Mutex<usize>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> MemoryStore<T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            document: Mutex::new(None),
            saves: Mutex::new(0),
            _marker: PhantomData,
        }
    }

    /// Creates a store pre-seeded with a raw document.
    ///
    /// The text is not validated, which is how tests simulate corrupt
    /// storage.
    pub fn with_raw(document: impl Into<String>) -> Self {
        let store = Self::new();
        *store.lock_document() = Some(document.into());
        store
    }

    /// The raw document currently stored, if any.
    pub fn raw(&self) -> Option<String> {
        self.lock_document().clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_document(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.document.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Store<T> for MemoryStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<T>> {
        match self.lock_document().as_deref() {
            None => Ok(None),
            Some(text) => serde_json::from_str(text)
                .map(Some)
                .map_err(|e| StoreError::Parse(e.to_string())),
        }
    }

    fn save(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).map_err(|e| StoreError::Serialize(e.to_string()))?;
        *self.lock_document() = Some(json);
        *self.saves.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
