//! Layout engine for the widget grid.
//!
//! Widgets are placed on a grid of integer cells. Every widget owns one
//! [`PlacementRect`] per [`Breakpoint`]; the four breakpoint layouts are
//! independent of each other and are only ever changed through the
//! placement functions in [`compact`], which keep each layout free of
//! overlaps.
//!
//! - [`breakpoint`]: viewport width to breakpoint resolution.
//! - [`rect`]: rectangle geometry.
//! - [`model`]: per-breakpoint collections of rectangles.
//! - [`compact`]: collision resolution, vertical compaction, first-fit.

pub mod breakpoint;
pub mod compact;
pub mod model;
pub mod rect;

pub use breakpoint::{Breakpoint, BreakpointSpec, Breakpoints, ParseBreakpointError};
pub use compact::{apply_change, compact, effective_min, first_fit, is_valid, Change};
pub use model::{BreakpointLayout, Layouts};
pub use rect::{CellSize, PlacementRect, MAX_ROW};
