//! The grid controller and its persisted snapshot.
//!
//! [`GridController`] owns the widget instances and the four breakpoint
//! layouts. Gestures and one-shot edits go through the pure placement
//! functions in [`crate::layout`], and every change to the arrangement is
//! saved as a [`GridSnapshot`] through a [`grid_store::Store`].

pub mod controller;
pub mod gesture;
pub mod snapshot;

pub use controller::GridController;
pub use gesture::{Gesture, GestureKind};
pub use snapshot::{GridSnapshot, WidgetInstance, SNAPSHOT_VERSION};

use crate::widgets::WidgetKind;

/// Errors returned by [`GridController`] operations.
///
/// Invalid placements are never errors; they are clamped.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// No widget has the given id.
    #[error("Widget not found: {0}")]
    UnknownWidget(String),

    /// The kind has no registration in the widget registry.
    #[error("Widget kind is not registered: {0}")]
    UnregisteredKind(WidgetKind),

    /// Another gesture is still active.
    #[error("A {kind} of widget {id} is already in progress")]
    GestureInProgress {
        /// Kind of the active gesture.
        kind: GestureKind,
        /// Widget it targets.
        id: String,
    },

    /// No gesture of the requested kind is active.
    #[error("No {0} in progress")]
    NoGesture(GestureKind),

    /// The active gesture targets a different widget.
    #[error("The active {kind} targets widget {active}, not {requested}")]
    GestureMismatch {
        /// Kind of the active gesture.
        kind: GestureKind,
        /// Widget the active gesture targets.
        active: String,
        /// Widget the caller addressed.
        requested: String,
    },
}
