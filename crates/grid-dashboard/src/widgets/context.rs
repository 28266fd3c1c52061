//! Shared state handed to every widget renderer.

use super::system_monitor::MonitorFeed;
use crate::lists::{Note, TodoItem};
use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Read-only state a widget may draw from.
///
/// Built with chained `with_*` calls; anything not supplied renders as an
/// empty state.
#[derive(Clone, Copy)]
pub struct WidgetContext<'a> {
    /// Current instant.
    pub now: DateTime<Utc>,
    /// Offset used to display local times.
    pub offset: FixedOffset,
    /// Todo items, newest first.
    pub todos: &'a [TodoItem],
    /// Notes, newest first.
    pub notes: &'a [Note],
    /// Latest system samples, if a monitor feed is running.
    pub monitor: Option<&'a MonitorFeed>,
}

impl<'a> WidgetContext<'a> {
    /// Creates a context at `now` in UTC with no list data.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            offset: Utc.fix(),
            todos: &[],
            notes: &[],
            monitor: None,
        }
    }

    /// Sets the display offset.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Attaches todo items.
    pub fn with_todos(mut self, todos: &'a [TodoItem]) -> Self {
        self.todos = todos;
        self
    }

    /// Attaches notes.
    pub fn with_notes(mut self, notes: &'a [Note]) -> Self {
        self.notes = notes;
        self
    }

    /// Attaches a system monitor feed.
    pub fn with_monitor(mut self, monitor: &'a MonitorFeed) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// `now` in the display offset.
    pub fn local_now(&self) -> DateTime<FixedOffset> {
        self.now.with_timezone(&self.offset)
    }
}
