//! Event handling for the TUI.
//!
//! Wraps crossterm events and adds a tick variant for timer-driven widgets.

use crate::tui::app::App;
use crate::widgets::WidgetKind;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent,
};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse button, drag or wheel event.
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Periodic tick.
    Tick,
}

/// Event handler that merges terminal input events with periodic ticks.
pub struct EventHandler {
    tick: Interval,
}

impl EventHandler {
    /// Creates a handler ticking every `tick_rate`. Must be called inside a runtime.
    pub fn new(tick_rate: Duration) -> Self {
        let mut tick = interval(tick_rate);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { tick }
    }

    /// Waits for the next event, returning either a terminal event or a tick.
    ///
    /// Uses `tokio::select!` to race between crossterm input and the tick timer.
    pub async fn next(&mut self, reader: &mut EventStream) -> std::io::Result<Event> {
        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                            return Ok(Event::Key(key))
                        }
                        Some(Ok(CrosstermEvent::Mouse(mouse))) => return Ok(Event::Mouse(mouse)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        // Key releases, focus and paste events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                _ = self.tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// Action produced by handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No action to take.
    None,
    /// Quit the application.
    Quit,
    /// Select the next widget in layout order.
    SelectNext,
    /// Select the previous widget in layout order.
    SelectPrevious,
    /// Move the selected widget by whole cells.
    Nudge(i32, i32),
    /// Grow (or shrink) the selected widget by whole cells.
    Grow(i32, i32),
    /// Open the add-widget menu.
    OpenMenu,
    /// Close the add-widget menu.
    CloseMenu,
    /// Add a widget of the given kind.
    Add(WidgetKind),
    /// Remove the selected widget.
    RemoveSelected,
    /// Re-pack every layout.
    ResetLayout,
    /// Scroll the grid by whole rows.
    Scroll(i32),
    /// Cancel the pointer gesture, else clear the selection.
    Cancel,
}

/// Maps a key event to an action for the current app state.
pub fn handle_key_event(app: &App, key: KeyEvent) -> Action {
    if should_quit(key) {
        return Action::Quit;
    }

    if app.menu_open() {
        return match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                let index = usize::from(c as u8 - b'1');
                app.menu_kinds()
                    .get(index)
                    .map_or(Action::None, |kind| Action::Add(*kind))
            }
            KeyCode::Esc | KeyCode::Char('a') => Action::CloseMenu,
            _ => Action::None,
        };
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let step = |dx: i32, dy: i32| if shift { Action::Grow(dx, dy) } else { Action::Nudge(dx, dy) };
    match key.code {
        KeyCode::Tab => Action::SelectNext,
        KeyCode::BackTab => Action::SelectPrevious,
        KeyCode::Left | KeyCode::Char('h') => step(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => step(1, 0),
        KeyCode::Up | KeyCode::Char('k') => step(0, -1),
        KeyCode::Down | KeyCode::Char('j') => step(0, 1),
        KeyCode::Char('H') => Action::Grow(-1, 0),
        KeyCode::Char('L') => Action::Grow(1, 0),
        KeyCode::Char('K') => Action::Grow(0, -1),
        KeyCode::Char('J') => Action::Grow(0, 1),
        KeyCode::Char('a') => Action::OpenMenu,
        KeyCode::Char('d') | KeyCode::Delete => Action::RemoveSelected,
        KeyCode::Char('R') => Action::ResetLayout,
        KeyCode::PageUp => Action::Scroll(-1),
        KeyCode::PageDown => Action::Scroll(1),
        KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

/// Returns true if the key event should trigger application quit.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c')))
}
