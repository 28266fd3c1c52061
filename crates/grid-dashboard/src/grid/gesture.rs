//! Drag and resize gesture sessions.

use crate::layout::{Breakpoint, BreakpointLayout, Change, PlacementRect};
use std::fmt;

/// What a gesture changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Moves the widget.
    Drag,
    /// Changes the widget size from its bottom-right corner.
    Resize,
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureKind::Drag => f.write_str("drag"),
            GestureKind::Resize => f.write_str("resize"),
        }
    }
}

/// An in-progress gesture on one widget.
///
/// Keeps the layout as it was when the gesture began. Every update is
/// computed from that layout, so widgets pushed aside earlier in the gesture
/// return once the dragged widget moves away, and cancelling restores it
/// exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gesture {
    /// Drag or resize.
    pub kind: GestureKind,
    /// Target widget.
    pub id: String,
    /// Breakpoint whose layout the gesture edits.
    pub breakpoint: Breakpoint,
    /// The target's rectangle when the gesture began.
    pub origin: PlacementRect,
    /// The whole layout when the gesture began.
    pub before: BreakpointLayout,
}

impl Gesture {
    /// Change proposed by a cumulative delta from the origin.
    ///
    /// For a drag the delta moves the top-left corner; for a resize it
    /// grows the size.
    pub fn change(&self, d1: i32, d2: i32) -> Change {
        match self.kind {
            GestureKind::Drag => Change::Move {
                x: i32::from(self.origin.x) + d1,
                y: i32::from(self.origin.y) + d2,
            },
            GestureKind::Resize => Change::Resize {
                w: i32::from(self.origin.w) + d1,
                h: i32::from(self.origin.h) + d2,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture(kind: GestureKind) -> Gesture {
        let origin = PlacementRect::new("a", 2, 3, 4, 2);
        Gesture {
            kind,
            id: "a".to_string(),
            breakpoint: Breakpoint::Lg,
            before: BreakpointLayout::from_items(vec![origin.clone()]),
            origin,
        }
    }

    #[test]
    fn test_drag_delta_offsets_origin() {
        assert_eq!(
            gesture(GestureKind::Drag).change(-5, 1),
            Change::Move { x: -3, y: 4 }
        );
    }

    #[test]
    fn test_resize_delta_grows_size() {
        assert_eq!(
            gesture(GestureKind::Resize).change(2, -1),
            Change::Resize { w: 6, h: 1 }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(GestureKind::Drag.to_string(), "drag");
        assert_eq!(GestureKind::Resize.to_string(), "resize");
    }
}
