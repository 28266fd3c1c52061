//! Todo list widget state.

use super::{ItemList, ListError, ListItem};
use crate::schedule::Clock;
use chrono::{DateTime, Utc};
use grid_store::Store;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Importance of a todo item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default priority.
    #[default]
    Medium,
    /// Do first.
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "med" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("invalid priority: {s} (expected low, medium or high)")),
        }
    }
}

/// One entry of the todo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier.
    pub id: String,
    /// What needs doing.
    pub text: String,
    /// Importance.
    #[serde(default)]
    pub priority: Priority,
    /// Whether the item is done.
    #[serde(default)]
    pub completed: bool,
    /// When the item was added.
    pub created_at: DateTime<Utc>,
    /// When the item last changed.
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a [`TodoItem`]. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    /// New text.
    pub text: Option<String>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New completion flag.
    pub completed: Option<bool>,
}

impl ListItem for TodoItem {
    type Patch = TodoPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: TodoPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

/// The todo list, newest item first.
#[derive(Debug)]
pub struct TodoList {
    list: ItemList<TodoItem>,
}

impl TodoList {
    /// Loads the list from `store`; see [`ItemList::load`].
    pub fn load(store: Box<dyn Store<Vec<TodoItem>>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            list: ItemList::load("todo", store, clock),
        }
    }

    /// Items, newest first.
    pub fn items(&self) -> &[TodoItem] {
        self.list.items()
    }

    /// Item with the given id.
    pub fn get(&self, id: &str) -> Option<&TodoItem> {
        self.list.get(id)
    }

    /// Number of items not yet completed.
    pub fn open_count(&self) -> usize {
        self.items().iter().filter(|t| !t.completed).count()
    }

    /// Adds a new open item at the top and returns it.
    pub fn add(&mut self, text: impl Into<String>, priority: Priority) -> &TodoItem {
        let text = text.into();
        self.list.add(|id, now| TodoItem {
            id,
            text,
            priority,
            completed: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merges `patch` into the item `id`.
    pub fn update(&mut self, id: &str, patch: TodoPatch) -> Result<&TodoItem, ListError> {
        self.list.update(id, patch)
    }

    /// Flips the completion flag of the item `id`.
    pub fn toggle(&mut self, id: &str) -> Result<&TodoItem, ListError> {
        let completed = self
            .get(id)
            .map(|t| !t.completed)
            .ok_or_else(|| ListError::NotFound(id.to_string()))?;
        self.list.update(
            id,
            TodoPatch {
                completed: Some(completed),
                ..TodoPatch::default()
            },
        )
    }

    /// Removes the item `id`.
    pub fn remove(&mut self, id: &str) -> Result<TodoItem, ListError> {
        self.list.remove(id)
    }

    /// Removes every completed item and returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        self.list.remove_where(|t| t.completed)
    }
}
