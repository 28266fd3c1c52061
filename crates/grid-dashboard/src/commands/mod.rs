//! Command implementations for the `gdash` CLI.
//!
//! - `grid` - layout and widget commands
//! - `lists` - todo and note commands
//! - `config` - configuration file commands
//! - `tui` - the interactive dashboard
//!
//! Every handler returns an `ExitCode`; errors are printed to stderr.

pub(crate) mod config;
pub(crate) mod grid;
pub(crate) mod lists;
pub(crate) mod tui;

pub(crate) use config::*;
pub(crate) use grid::*;
pub(crate) use lists::*;
pub(crate) use tui::*;

use grid_dashboard::config::schema::Config;
use grid_dashboard::config::xdg;
use grid_dashboard::grid::GridController;
use grid_dashboard::lists::{NoteBook, TodoList};
use grid_dashboard::schedule::{Clock, SystemClock};
use grid_dashboard::widgets::WidgetRegistry;
use grid_store::JsonFileStore;
use std::fmt;
use std::process::ExitCode;
use std::sync::Arc;

/// Length of ids as printed by list commands.
pub(crate) const SHORT_ID_LEN: usize = 8;

/// Prints `Error: {e}` to stderr and returns a failing exit code.
pub(crate) fn fail(e: impl fmt::Display) -> ExitCode {
    eprintln!("Error: {e}");
    ExitCode::FAILURE
}

/// Creates the data directory so saves can succeed.
pub(crate) fn ensure_data_dir(config: &Config) -> Result<(), String> {
    let dir = config.storage.data_dir();
    xdg::ensure_dir(&dir).map_err(|e| format!("cannot create {}: {e}", dir.display()))
}

/// Grid controller over the configured `grid.json`.
pub(crate) fn open_grid(config: &Config) -> GridController {
    GridController::load(
        WidgetRegistry::new(),
        config.grid.breakpoints.to_breakpoints(),
        Box::new(JsonFileStore::new(config.storage.grid_path())),
    )
}

/// Todo list over the configured `todos.json`.
pub(crate) fn open_todos(config: &Config, clock: Arc<dyn Clock>) -> TodoList {
    TodoList::load(Box::new(JsonFileStore::new(config.storage.todo_path())), clock)
}

/// Notes over the configured `notes.json`.
pub(crate) fn open_notes(config: &Config, clock: Arc<dyn Clock>) -> NoteBook {
    NoteBook::load(Box::new(JsonFileStore::new(config.storage.notes_path())), clock)
}

/// The wall clock.
pub(crate) fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

/// Resolves `query` to one of `ids`: an exact match, else a unique prefix.
pub(crate) fn resolve_id<'a>(
    query: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<String, String> {
    let mut matches = Vec::new();
    for id in ids {
        if id == query {
            return Ok(id.to_string());
        }
        if id.starts_with(query) {
            matches.push(id);
        }
    }
    match matches.as_slice() {
        [] => Err(format!("no item matches '{query}'")),
        [only] => Ok((*only).to_string()),
        _ => Err(format!(
            "'{query}' is ambiguous ({} items match)",
            matches.len()
        )),
    }
}

/// First characters of an id.
pub(crate) fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
