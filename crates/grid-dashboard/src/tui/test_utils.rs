//! Shared test utilities for TUI testing with ratatui TestBackend.

use crate::grid::GridController;
use crate::layout::Breakpoints;
use crate::lists::{NoteBook, TodoList};
use crate::schedule::{Clock, ManualClock};
use crate::tui::app::{App, AppOptions};
use crate::tui::ui::render;
use crate::widgets::{MonitorFeed, SimulatedSampler, WidgetRegistry};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use grid_store::MemoryStore;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::sync::Arc;
use std::time::Duration;

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Finds the first row index that contains the given text, or None if not found.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    (0..buffer.area().height).find(|row| row_text(buffer, *row).contains(text))
}

/// A key press.
pub fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// A left-button mouse event at a terminal position.
pub fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Mouse-down with the left button.
pub fn press(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

/// Drag with the left button held.
pub fn drag(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Drag(MouseButton::Left), column, row)
}

/// Left button released.
pub fn release(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Up(MouseButton::Left), column, row)
}

/// Stores and clock behind a test app, kept for assertions.
pub struct Fixture {
    pub grid_store: Arc<MemoryStore<crate::grid::GridSnapshot>>,
    pub clock: Arc<ManualClock>,
}

/// An app over in-memory stores, a manual clock and a simulated monitor,
/// sized to a 120x40 terminal (1200px, the `lg` breakpoint).
pub fn test_app() -> App {
    test_app_with_fixture().0
}

/// Like [`test_app`], also returning its stores and clock.
pub fn test_app_with_fixture() -> (App, Fixture) {
    let grid_store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::default());
    let shared_clock: Arc<dyn Clock> = clock.clone();
    let grid = GridController::load(
        WidgetRegistry::new(),
        Breakpoints::default(),
        Box::new(grid_store.clone()),
    );
    let todos = TodoList::load(Box::new(MemoryStore::new()), shared_clock.clone());
    let notes = NoteBook::load(Box::new(MemoryStore::new()), shared_clock.clone());
    let monitor = MonitorFeed::new(Box::new(SimulatedSampler::new(7)), Duration::from_secs(2));
    let mut app = App::new(
        grid,
        todos,
        notes,
        monitor,
        shared_clock,
        AppOptions::default(),
    );
    app.resize(120, 40);
    (app, Fixture { grid_store, clock })
}

/// Renders `app` into a fresh buffer of the given size.
pub fn render_app(app: &mut App, width: u16, height: u16) -> Buffer {
    app.resize(width, height);
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| render(frame, app))
        .expect("failed to draw");
    terminal.backend().buffer().clone()
}
