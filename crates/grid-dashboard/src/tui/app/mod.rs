//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, the panic hook, and the render loop.
//! Pointer gestures are tracked in grid cells: a mouse-down over a widget
//! begins a drag (or a resize on its bottom-right corner), every drag event
//! sends the cumulative cell delta since the mouse-down, and mouse-up ends
//! the gesture. Leaving the grid area or pressing `Esc` cancels it.

use crate::config::schema::Config;
use crate::config::ConfigError;
use crate::grid::{GestureKind, GridController, GridError};
use crate::layout::Breakpoint;
use crate::lists::{NoteBook, TodoList};
use crate::schedule::{Clock, Periodic};
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::geometry::GridGeometry;
use crate::tui::ui::{grid_area, render};
use crate::widgets::{MonitorFeed, WidgetKind};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::Rect;
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;

/// How long a status message stays in the footer.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Settings of the TUI taken from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppOptions {
    /// Pixels attributed to one terminal column.
    pub cell_width_px: u32,
    /// Terminal rows per grid row.
    pub row_height: u16,
    /// Event loop tick.
    pub tick_rate: Duration,
    /// Clock widget refresh interval.
    pub clock_refresh: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            cell_width_px: 10,
            row_height: 3,
            tick_rate: Duration::from_millis(250),
            clock_refresh: Duration::from_secs(1),
        }
    }
}

impl AppOptions {
    /// Options of `config`.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            cell_width_px: config.grid.cell_width_px,
            row_height: config.grid.row_height,
            tick_rate: config.tui.tick_rate()?,
            clock_refresh: config.tui.clock_refresh()?,
        })
    }
}

/// A gesture started with the mouse.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PointerGesture {
    kind: GestureKind,
    id: String,
    /// Grid cell under the pointer at mouse-down.
    anchor: (u16, u16),
}

/// Core application state for the TUI.
pub struct App {
    /// The widget grid.
    pub grid: GridController,
    /// Backing list of todo widgets.
    pub todos: TodoList,
    /// Backing notes of notes widgets.
    pub notes: NoteBook,
    /// Readings shown by system monitor widgets.
    pub monitor: MonitorFeed,
    /// Offset clock and calendar widgets display in.
    pub offset: FixedOffset,
    /// Selected widget id.
    pub selected: Option<String>,
    /// First visible grid row.
    pub scroll: u16,
    /// Footer message and the time it expires.
    pub status_message: Option<(String, DateTime<Utc>)>,
    /// Whether the application should exit.
    pub should_quit: bool,
    options: AppOptions,
    clock: Arc<dyn Clock>,
    clock_tick: Periodic,
    pointer: Option<PointerGesture>,
    menu: bool,
    viewport_px: u32,
    geometry: GridGeometry,
}

impl App {
    /// Creates the app. Call [`App::resize`] before the first render.
    pub fn new(
        grid: GridController,
        todos: TodoList,
        notes: NoteBook,
        monitor: MonitorFeed,
        clock: Arc<dyn Clock>,
        options: AppOptions,
    ) -> Self {
        let geometry = GridGeometry::new(Rect::default(), grid.cols(), options.row_height, 0);
        Self {
            grid,
            todos,
            notes,
            monitor,
            offset: Utc.fix(),
            selected: None,
            scroll: 0,
            status_message: None,
            should_quit: false,
            clock_tick: Periodic::new(options.clock_refresh),
            options,
            clock,
            pointer: None,
            menu: false,
            viewport_px: 0,
            geometry,
        }
    }

    /// Sets the offset clock and calendar widgets display in.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Current time of the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Viewport width in pixels, as used for breakpoint resolution.
    pub fn viewport_px(&self) -> u32 {
        self.viewport_px
    }

    /// Where the grid was last laid out.
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Returns `true` while the add-widget menu is shown.
    pub fn menu_open(&self) -> bool {
        self.menu
    }

    /// Kinds offered by the add-widget menu, in menu order.
    pub fn menu_kinds(&self) -> Vec<WidgetKind> {
        self.grid.registry().kinds()
    }

    /// Id of the widget under an active pointer gesture.
    pub fn pointer_target(&self) -> Option<(&str, GestureKind)> {
        self.pointer.as_ref().map(|p| (p.id.as_str(), p.kind))
    }

    /// Adapts to a terminal of `columns` x `rows`.
    ///
    /// The viewport width is `columns * cell_width_px`. Crossing into another
    /// breakpoint cancels a pointer gesture.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.viewport_px = u32::from(columns) * self.options.cell_width_px;
        let before = self.grid.active_breakpoint();
        let bp = self.grid.set_viewport_width(self.viewport_px);
        if bp != before {
            tracing::debug!(from = %before, to = %bp, px = self.viewport_px, "breakpoint changed");
        }
        if self.grid.gesture().is_none() {
            self.pointer = None;
        }
        self.set_grid_area(grid_area(Rect::new(0, 0, columns, rows)));
    }

    /// Records where the grid is drawn. Called on every render.
    pub fn set_grid_area(&mut self, area: Rect) {
        self.geometry = GridGeometry::new(area, self.grid.cols(), self.options.row_height, 0);
        self.scroll = self.scroll.min(self.max_scroll());
        self.geometry.scroll = self.scroll;
    }

    fn max_scroll(&self) -> u16 {
        self.grid
            .active_layout()
            .height()
            .saturating_sub(self.geometry.visible_rows())
    }

    /// Advances timers. Returns `true` if anything visible changed.
    pub fn on_tick(&mut self) -> bool {
        let now = self.clock.now();
        let mut changed = false;
        if let Some((_, expiry)) = &self.status_message {
            if now >= *expiry {
                self.status_message = None;
                changed = true;
            }
        }
        if self.has_widget(WidgetKind::Clock) || self.has_widget(WidgetKind::Calendar) {
            changed |= self.clock_tick.poll(now);
        }
        if self.has_widget(WidgetKind::SystemMonitor) {
            changed |= self.monitor.poll(now);
        }
        changed
    }

    fn has_widget(&self, kind: WidgetKind) -> bool {
        self.grid.widgets().iter().any(|w| w.kind == kind)
    }

    /// Shows `message` in the footer for a few seconds.
    pub fn set_status(&mut self, message: impl Into<String>) {
        let expiry = self.clock.now()
            + chrono::Duration::from_std(STATUS_TTL).unwrap_or_else(|_| chrono::Duration::seconds(3));
        self.status_message = Some((message.into(), expiry));
    }

    fn report(&mut self, result: Result<(), GridError>) {
        if let Err(e) = result {
            tracing::debug!("ignored grid operation: {}", e);
            self.set_status(e.to_string());
        }
    }

    /// Widget ids of the active layout in reading order.
    fn reading_order(&self) -> Vec<String> {
        let mut rects: Vec<_> = self.grid.active_layout().iter().collect();
        rects.sort_by_key(|r| (r.y, r.x));
        rects.into_iter().map(|r| r.id.clone()).collect()
    }

    fn select_step(&mut self, forward: bool) {
        let order = self.reading_order();
        if order.is_empty() {
            self.selected = None;
            return;
        }
        let current = self
            .selected
            .as_ref()
            .and_then(|id| order.iter().position(|o| o == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => order.len() - 1,
            (Some(i), true) => (i + 1) % order.len(),
            (Some(i), false) => (i + order.len() - 1) % order.len(),
        };
        self.selected = Some(order[next].clone());
    }

    /// Applies a keyboard action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::SelectNext => self.select_step(true),
            Action::SelectPrevious => self.select_step(false),
            Action::Nudge(dx, dy) => {
                if let Some(rect) = self.selected_rect() {
                    let result = self.grid.move_widget(
                        &rect.id,
                        i32::from(rect.x) + dx,
                        i32::from(rect.y) + dy,
                    );
                    self.report(result);
                }
            }
            Action::Grow(dw, dh) => {
                if let Some(rect) = self.selected_rect() {
                    let result = self.grid.resize_widget(
                        &rect.id,
                        i32::from(rect.w) + dw,
                        i32::from(rect.h) + dh,
                    );
                    self.report(result);
                }
            }
            Action::OpenMenu => self.menu = true,
            Action::CloseMenu => self.menu = false,
            Action::Add(kind) => {
                self.menu = false;
                match self.grid.add_widget(kind, None) {
                    Ok(id) => {
                        self.selected = Some(id);
                        self.set_status(format!("Added {}", kind.builtin_spec().title));
                    }
                    Err(e) => self.report(Err(e)),
                }
            }
            Action::RemoveSelected => {
                if let Some(id) = self.selected.clone() {
                    match self.grid.remove_widget(&id) {
                        Ok(instance) => {
                            self.selected = None;
                            self.set_status(format!("Removed {}", instance.title));
                        }
                        Err(e) => self.report(Err(e)),
                    }
                }
            }
            Action::ResetLayout => {
                let result = self.grid.reset_layouts();
                self.report(result);
            }
            Action::Scroll(rows) => {
                let target = (i32::from(self.scroll) + rows).clamp(0, i32::from(self.max_scroll()));
                self.scroll = target as u16;
                self.geometry.scroll = self.scroll;
            }
            Action::Cancel => {
                if self.pointer.is_some() {
                    self.cancel_pointer();
                } else if self.menu {
                    self.menu = false;
                } else {
                    self.selected = None;
                }
            }
        }
    }

    fn selected_rect(&self) -> Option<crate::layout::PlacementRect> {
        let id = self.selected.as_deref()?;
        self.grid.active_layout().get(id).cloned()
    }

    /// Handles a mouse event.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.menu {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer_down(mouse.column, mouse.row),
            MouseEventKind::Drag(MouseButton::Left) => self.pointer_drag(mouse.column, mouse.row),
            MouseEventKind::Up(MouseButton::Left) => self.pointer_up(),
            MouseEventKind::ScrollDown => self.apply(Action::Scroll(1)),
            MouseEventKind::ScrollUp => self.apply(Action::Scroll(-1)),
            _ => {}
        }
    }

    fn pointer_down(&mut self, column: u16, row: u16) {
        if self.pointer.is_some() {
            return;
        }
        let Some(cell) = self.geometry.cell_at(column, row) else {
            return;
        };
        let Some(rect) = self.grid.active_layout().at_cell(cell.0, cell.1).cloned() else {
            self.selected = None;
            return;
        };
        self.selected = Some(rect.id.clone());
        let kind = if self.geometry.is_resize_handle(&rect, column, row) {
            GestureKind::Resize
        } else {
            GestureKind::Drag
        };
        let result = match kind {
            GestureKind::Drag => self.grid.begin_drag(&rect.id),
            GestureKind::Resize => self.grid.begin_resize(&rect.id),
        };
        match result {
            Ok(()) => {
                self.pointer = Some(PointerGesture {
                    kind,
                    id: rect.id,
                    anchor: cell,
                })
            }
            Err(e) => self.report(Err(e)),
        }
    }

    fn pointer_drag(&mut self, column: u16, row: u16) {
        let Some(pointer) = self.pointer.clone() else {
            return;
        };
        let Some((col, grid_row)) = self.geometry.cell_at(column, row) else {
            self.cancel_pointer();
            return;
        };
        let d1 = i32::from(col) - i32::from(pointer.anchor.0);
        let d2 = i32::from(grid_row) - i32::from(pointer.anchor.1);
        let result = match pointer.kind {
            GestureKind::Drag => self.grid.update_drag(&pointer.id, d1, d2),
            GestureKind::Resize => self.grid.update_resize(&pointer.id, d1, d2),
        };
        self.report(result);
    }

    fn pointer_up(&mut self) {
        let Some(pointer) = self.pointer.take() else {
            return;
        };
        let result = match pointer.kind {
            GestureKind::Drag => self.grid.end_drag(&pointer.id),
            GestureKind::Resize => self.grid.end_resize(&pointer.id),
        };
        self.report(result);
    }

    fn cancel_pointer(&mut self) {
        let Some(pointer) = self.pointer.take() else {
            return;
        };
        let result = match pointer.kind {
            GestureKind::Drag => self.grid.cancel_drag(&pointer.id),
            GestureKind::Resize => self.grid.cancel_resize(&pointer.id),
        };
        if result.is_ok() {
            self.set_status(format!("Cancelled {}", pointer.kind));
        }
        self.report(result);
    }

    /// Dispatches one event. Returns `true` if the screen should be redrawn.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => {
                let action = handle_key_event(self, key);
                self.apply(action);
                true
            }
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                true
            }
            Event::Resize(columns, rows) => {
                self.resize(columns, rows);
                true
            }
            Event::Tick => self.on_tick(),
        }
    }

    /// Active breakpoint of the grid.
    pub fn breakpoint(&self) -> Breakpoint {
        self.grid.active_breakpoint()
    }

    /// Runs the TUI application: sets up terminal, enters event loop, restores on exit.
    pub async fn run(&mut self) -> io::Result<()> {
        // Restore the terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;
        let result = self.event_loop().await;
        restore_terminal()?;
        result
    }

    async fn event_loop(&mut self) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let size = terminal.size()?;
        self.resize(size.width, size.height);
        self.on_tick();

        let mut events = EventHandler::new(self.options.tick_rate);
        let mut reader = EventStream::new();
        let mut dirty = true;

        loop {
            if dirty {
                terminal.draw(|frame| render(frame, self))?;
            }
            let event = events.next(&mut reader).await?;
            dirty = self.handle_event(event);
            if self.should_quit {
                if self.pointer.is_some() {
                    self.cancel_pointer();
                }
                return Ok(());
            }
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
