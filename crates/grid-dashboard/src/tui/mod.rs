//! Terminal host for the widget grid.
//!
//! Renders the active breakpoint's layout with ratatui and turns crossterm
//! mouse and key events into grid controller calls.

pub mod app;
pub mod event;
pub mod geometry;
pub mod ui;

#[cfg(test)]
mod test_utils;
