//! Grid rectangle geometry.

use serde::{Deserialize, Serialize};

/// Lowest row a clamped rectangle may reach with its bottom edge.
///
/// Placement clamps every changed rectangle so that `y + h <= MAX_ROW`.
/// Rectangles pushed down by a collision may go past it; the headroom up
/// to `u16::MAX` keeps their edges from saturating.
pub const MAX_ROW: u16 = u16::MAX / 2;

/// A width/height pair measured in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellSize {
    /// Width in columns.
    pub w: u16,
    /// Height in rows.
    pub h: u16,
}

impl CellSize {
    /// Creates a new size.
    pub const fn new(w: u16, h: u16) -> Self {
        Self { w, h }
    }
}

/// Position and size of one widget on one breakpoint, in grid cells.
///
/// The origin is the top-left corner of the grid; `y` grows downward.
///
/// # Example
///
/// ```
/// use grid_dashboard::layout::PlacementRect;
///
/// let a = PlacementRect::new("a", 0, 0, 3, 2);
/// let b = PlacementRect::new("b", 2, 1, 3, 2);
/// let c = PlacementRect::new("c", 3, 0, 2, 2);
/// assert!(a.overlaps(&b));
/// assert!(!a.overlaps(&c));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacementRect {
    /// Identifier of the widget instance this rectangle places.
    pub id: String,
    /// Column of the left edge.
    pub x: u16,
    /// Row of the top edge.
    pub y: u16,
    /// Width in columns.
    pub w: u16,
    /// Height in rows.
    pub h: u16,
}

impl PlacementRect {
    /// Creates a rectangle for the widget `id`.
    pub fn new(id: impl Into<String>, x: u16, y: u16, w: u16, h: u16) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
        }
    }

    /// Column just past the right edge.
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.w)
    }

    /// Row just past the bottom edge.
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.h)
    }

    /// Size of the rectangle.
    pub fn size(&self) -> CellSize {
        CellSize::new(self.w, self.h)
    }

    /// Returns `true` if the column ranges of the two rectangles intersect.
    pub fn overlaps_horizontally(&self, other: &Self) -> bool {
        self.x < other.right() && other.x < self.right()
    }

    /// Returns `true` if the two rectangles share at least one cell.
    ///
    /// Edge-adjacent rectangles do not overlap. A rectangle with zero width
    /// or height overlaps nothing.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_horizontally(other) && self.y < other.bottom() && other.y < self.bottom()
    }

    /// Returns `true` if the cell at (`col`, `row`) lies inside the rectangle.
    pub fn contains_cell(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.right() && row >= self.y && row < self.bottom()
    }
}
