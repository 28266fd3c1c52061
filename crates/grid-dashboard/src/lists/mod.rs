//! Persisted list widgets: the todo list and the notes board.
//!
//! Both are an ordered [`ItemList`] saved through a [`grid_store::Store`]
//! after every mutation. Loading never fails: a corrupt or unreadable
//! document is logged and the list starts empty, and a failed save keeps
//! the in-memory state.

pub mod notes;
pub mod todo;

pub use notes::{Note, NoteBook, NotePatch};
pub use todo::{Priority, TodoItem, TodoList, TodoPatch};

use crate::schedule::Clock;
use chrono::{DateTime, Utc};
use grid_store::Store;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Errors from list operations.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// No item has the given id.
    #[error("Item not found: {0}")]
    NotFound(String),
}

/// An item that can live in an [`ItemList`].
pub trait ListItem: Clone + Serialize + DeserializeOwned {
    /// Partial update accepted by [`ItemList::update`].
    type Patch;

    /// Unique identifier of the item.
    fn id(&self) -> &str;

    /// Merges the fields present in `patch`.
    fn apply(&mut self, patch: Self::Patch);

    /// Records `at` as the last modification time.
    fn touch(&mut self, at: DateTime<Utc>);
}

/// An ordered, persisted collection of items, newest first.
pub struct ItemList<T: ListItem> {
    items: Vec<T>,
    store: Box<dyn Store<Vec<T>>>,
    clock: Arc<dyn Clock>,
    label: &'static str,
}

impl<T: ListItem> ItemList<T> {
    /// Loads the list from `store`.
    ///
    /// A missing document yields an empty list. A load error is logged and
    /// also yields an empty list.
    pub fn load(label: &'static str, store: Box<dyn Store<Vec<T>>>, clock: Arc<dyn Clock>) -> Self {
        let items = match store.load() {
            Ok(Some(items)) => {
                tracing::debug!(list = label, count = items.len(), "loaded list");
                items
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(list = label, "failed to load list, starting empty: {}", e);
                Vec::new()
            }
        };
        Self {
            items,
            store,
            clock,
            label,
        }
    }

    /// Items in display order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item with the given id.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Builds a new item from a fresh id and the current time, prepends it
    /// and persists the list.
    pub fn add(&mut self, build: impl FnOnce(String, DateTime<Utc>) -> T) -> &T {
        let id = uuid::Uuid::new_v4().to_string();
        let item = build(id, self.clock.now());
        self.items.insert(0, item);
        self.persist();
        &self.items[0]
    }

    /// Merges `patch` into the item `id`, refreshes its update time and
    /// persists the list.
    pub fn update(&mut self, id: &str, patch: T::Patch) -> Result<&T, ListError> {
        let now = self.clock.now();
        let pos = self.position(id)?;
        let item = &mut self.items[pos];
        item.apply(patch);
        item.touch(now);
        self.persist();
        Ok(&self.items[pos])
    }

    /// Removes the item `id` and persists the list.
    pub fn remove(&mut self, id: &str) -> Result<T, ListError> {
        let pos = self.position(id)?;
        let removed = self.items.remove(pos);
        self.persist();
        Ok(removed)
    }

    /// Removes every item for which `drop` returns `true`.
    ///
    /// Persists only if something was removed. Returns the number removed.
    pub fn remove_where(&mut self, mut drop: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !drop(item));
        let removed = before - self.items.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    fn position(&self, id: &str) -> Result<usize, ListError> {
        self.items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| ListError::NotFound(id.to_string()))
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.items) {
            tracing::warn!(list = self.label, "failed to save list: {}", e);
        }
    }
}

impl<T: ListItem + std::fmt::Debug> std::fmt::Debug for ItemList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemList")
            .field("label", &self.label)
            .field("items", &self.items)
            .finish()
    }
}
