//! Grid Dashboard library
//!
//! A responsive grid of widgets for the terminal. Widgets are placed on an
//! integer cell grid with one independent layout per breakpoint, moved and
//! resized through drag and resize gestures, and persisted after every
//! change.
//!
//! - [`layout`]: breakpoints, rectangles, collision resolution, compaction.
//! - [`grid`]: the grid controller owning widgets, layouts and gestures.
//! - [`widgets`]: the widget registry and the built-in widgets.
//! - [`lists`]: persisted todo list and notes backing their widgets.
//! - [`tui`]: the ratatui host.
//! - [`auth`]: the account session gate.

/// Account sign-up, sign-in and session events.
pub mod auth;

/// Configuration utilities including XDG path resolution.
pub mod config;

/// Widget grid controller and persisted grid document.
pub mod grid;

/// Layout engine for the widget grid.
pub mod layout;

/// Todo list and notes storage.
pub mod lists;

/// Logging initialization.
pub mod logging;

/// Injected clock and periodic ticks.
pub mod schedule;

/// TUI module providing the terminal user interface for the dashboard.
pub mod tui;

/// Widget system for composable dashboard UI components.
pub mod widgets;
