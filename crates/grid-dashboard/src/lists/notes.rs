//! Notes widget state.

use super::{ItemList, ListError, ListItem};
use crate::schedule::Clock;
use chrono::{DateTime, Utc};
use grid_store::Store;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A short titled note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub content: String,
    /// Pinned notes are listed first.
    #[serde(default)]
    pub pinned: bool,
    /// When the note was added.
    pub created_at: DateTime<Utc>,
    /// When the note last changed.
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a [`Note`]. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    /// New headline.
    pub title: Option<String>,
    /// New body.
    pub content: Option<String>,
    /// New pin flag.
    pub pinned: Option<bool>,
}

impl ListItem for Note {
    type Patch = NotePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(pinned) = patch.pinned {
            self.pinned = pinned;
        }
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

/// The notes board.
#[derive(Debug)]
pub struct NoteBook {
    list: ItemList<Note>,
}

impl NoteBook {
    /// Loads the notes from `store`; see [`ItemList::load`].
    pub fn load(store: Box<dyn Store<Vec<Note>>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            list: ItemList::load("notes", store, clock),
        }
    }

    /// Notes in storage order, newest first.
    pub fn items(&self) -> &[Note] {
        self.list.items()
    }

    /// Notes for display: pinned first, otherwise newest first.
    pub fn sorted(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.items().iter().collect();
        notes.sort_by_key(|n| !n.pinned);
        notes
    }

    /// Adds a new note at the top and returns it.
    pub fn add(&mut self, title: impl Into<String>, content: impl Into<String>) -> &Note {
        let title = title.into();
        let content = content.into();
        self.list.add(|id, now| Note {
            id,
            title,
            content,
            pinned: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merges `patch` into the note `id`.
    pub fn update(&mut self, id: &str, patch: NotePatch) -> Result<&Note, ListError> {
        self.list.update(id, patch)
    }

    /// Flips the pin flag of the note `id`.
    pub fn toggle_pin(&mut self, id: &str) -> Result<&Note, ListError> {
        let pinned = self
            .list
            .get(id)
            .map(|n| !n.pinned)
            .ok_or_else(|| ListError::NotFound(id.to_string()))?;
        self.list.update(
            id,
            NotePatch {
                pinned: Some(pinned),
                ..NotePatch::default()
            },
        )
    }

    /// Removes the note `id`.
    pub fn remove(&mut self, id: &str) -> Result<Note, ListError> {
        self.list.remove(id)
    }
}
