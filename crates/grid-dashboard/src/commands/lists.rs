//! Todo and note commands.

use super::{ensure_data_dir, fail, open_notes, open_todos, resolve_id, short_id, system_clock};
use crate::{NoteAction, TodoAction};
use grid_dashboard::config::schema::Config;
use grid_dashboard::lists::{Note, NoteBook, TodoItem, TodoList};
use std::process::ExitCode;

/// Runs a `todo` subcommand.
pub(crate) fn run_todo_command(config: &Config, action: TodoAction) -> ExitCode {
    if !matches!(action, TodoAction::List) {
        if let Err(e) = ensure_data_dir(config) {
            return fail(e);
        }
    }
    let mut todos = open_todos(config, system_clock());
    match todo(&mut todos, action) {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn todo(todos: &mut TodoList, action: TodoAction) -> Result<String, String> {
    match action {
        TodoAction::Add { text, priority } => {
            let item = todos.add(text, priority);
            Ok(format!("Added todo {}", short_id(&item.id)))
        }
        TodoAction::List => Ok(todo_table(todos.items())),
        TodoAction::Toggle { id } => {
            let id = todo_id(todos, &id)?;
            let item = todos.toggle(&id).map_err(|e| e.to_string())?;
            let state = if item.completed { "done" } else { "open" };
            Ok(format!("Marked {} {state}", short_id(&item.id)))
        }
        TodoAction::Remove { id } => {
            let id = todo_id(todos, &id)?;
            let item = todos.remove(&id).map_err(|e| e.to_string())?;
            Ok(format!("Removed todo {}: {}", short_id(&item.id), item.text))
        }
        TodoAction::ClearCompleted => {
            let n = todos.clear_completed();
            Ok(format!("Cleared {n} completed todo(s)"))
        }
    }
}

fn todo_id(todos: &TodoList, query: &str) -> Result<String, String> {
    resolve_id(query, todos.items().iter().map(|t| t.id.as_str()))
}

fn todo_table(items: &[TodoItem]) -> String {
    if items.is_empty() {
        return "No todos".to_string();
    }
    let open = items.iter().filter(|t| !t.completed).count();
    let mut lines = vec![format!("{:<8}  {:<3}  {:<6}  TEXT", "ID", "", "PRIO")];
    for t in items {
        lines.push(format!(
            "{:<8}  {:<3}  {:<6}  {}",
            short_id(&t.id),
            if t.completed { "[x]" } else { "[ ]" },
            t.priority.to_string(),
            t.text
        ));
    }
    lines.push(format!("{open} open, {} done", items.len() - open));
    lines.join("\n")
}

/// Runs a `note` subcommand.
pub(crate) fn run_note_command(config: &Config, action: NoteAction) -> ExitCode {
    if !matches!(action, NoteAction::List) {
        if let Err(e) = ensure_data_dir(config) {
            return fail(e);
        }
    }
    let mut notes = open_notes(config, system_clock());
    match note(&mut notes, action) {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn note(notes: &mut NoteBook, action: NoteAction) -> Result<String, String> {
    match action {
        NoteAction::Add { title, content } => {
            let note = notes.add(title, content.unwrap_or_default());
            Ok(format!("Added note {}", short_id(&note.id)))
        }
        NoteAction::List => Ok(note_table(&notes.sorted())),
        NoteAction::Pin { id } => {
            let id = note_id(notes, &id)?;
            let note = notes.toggle_pin(&id).map_err(|e| e.to_string())?;
            let state = if note.pinned { "Pinned" } else { "Unpinned" };
            Ok(format!("{state} {}", short_id(&note.id)))
        }
        NoteAction::Remove { id } => {
            let id = note_id(notes, &id)?;
            let note = notes.remove(&id).map_err(|e| e.to_string())?;
            Ok(format!("Removed note {}: {}", short_id(&note.id), note.title))
        }
    }
}

fn note_id(notes: &NoteBook, query: &str) -> Result<String, String> {
    resolve_id(query, notes.items().iter().map(|n| n.id.as_str()))
}

fn note_table(notes: &[&Note]) -> String {
    if notes.is_empty() {
        return "No notes".to_string();
    }
    notes
        .iter()
        .map(|n| {
            let pin = if n.pinned { "*" } else { " " };
            let mut entry = format!("{:<8} {pin} {}", short_id(&n.id), n.title);
            for line in n.content.lines() {
                entry.push_str("\n           ");
                entry.push_str(line);
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("\n")
}
