//! Collision resolution and vertical compaction.
//!
//! All functions here are pure: they take a layout and return a new one.
//! The placement policy is greedy and deterministic:
//!
//! 1. The changed rectangle is clamped into the grid and then fixed.
//! 2. Remaining rectangles settle in order of their `y`, then `x`, then
//!    insertion order. A rectangle that overlaps anything already settled is
//!    moved down to that rectangle's bottom edge until it is free.
//! 3. Vertical compaction moves every rectangle up as far as it can go
//!    without overlapping a rectangle compacted before it, processing in
//!    `y`, `x` order with ties broken by the position held before the change.
//!
//! Step 2 only ever increases `y`, so it terminates after a number of moves
//! bounded by the number of settled rectangles per item. Step 3 never moves
//! a rectangle into an overlap, and running it on its own output changes
//! nothing.

use super::model::BreakpointLayout;
use super::rect::{CellSize, PlacementRect, MAX_ROW};
use std::collections::{HashMap, HashSet};

/// A proposed change to one rectangle, in grid cells.
///
/// Coordinates are signed so gesture deltas can overshoot the grid; they are
/// clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Move the top-left corner to (`x`, `y`).
    Move {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
    },
    /// Set the size to `w` × `h`.
    Resize {
        /// Requested width.
        w: i32,
        /// Requested height.
        h: i32,
    },
}

/// Minimum size a widget may take on a grid with `cols` columns.
///
/// The width minimum cannot exceed the column count, and neither dimension
/// may be zero.
pub fn effective_min(min: CellSize, cols: u16) -> CellSize {
    let cols = cols.max(1);
    CellSize::new(min.w.clamp(1, cols), min.h.max(1))
}

fn to_cell(v: i32) -> u16 {
    v.clamp(0, i32::from(u16::MAX)) as u16
}

/// Clamps a rectangle into a grid of `cols` columns, keeping its size
/// and moving it left (or up) if it overflows the right edge (or
/// [`MAX_ROW`]).
fn clamp_position(mut rect: PlacementRect, min: CellSize, cols: u16) -> PlacementRect {
    let min = effective_min(min, cols);
    rect.w = rect.w.clamp(min.w, cols.max(1));
    rect.h = rect.h.max(min.h).min(MAX_ROW);
    if rect.right() > cols {
        rect.x = cols - rect.w;
    }
    rect.y = rect.y.min(MAX_ROW - rect.h);
    rect
}

/// Clamps a resized rectangle, clipping its width at the right edge
/// instead of moving it.
fn clamp_size(mut rect: PlacementRect, min: CellSize, cols: u16) -> PlacementRect {
    let min = effective_min(min, cols);
    let cols = cols.max(1);
    rect.w = rect.w.clamp(min.w, cols);
    rect.h = rect.h.max(min.h).min(MAX_ROW);
    if rect.right() > cols {
        rect.w = (cols - rect.x.min(cols)).max(min.w);
        if rect.right() > cols {
            rect.x = cols - rect.w;
        }
    }
    if rect.bottom() > MAX_ROW {
        rect.h = (MAX_ROW - rect.y.min(MAX_ROW)).max(min.h.min(MAX_ROW));
        rect.y = rect.y.min(MAX_ROW - rect.h);
    }
    rect
}

/// Applies `change` to the widget `id` and returns the resolved layout.
///
/// Returns `None` if `id` has no rectangle in `layout`. The result never
/// contains overlaps, and the changed rectangle respects `min` (capped at
/// the column count).
///
/// # Example
///
/// ```
/// use grid_dashboard::layout::{apply_change, BreakpointLayout, CellSize, Change, PlacementRect};
///
/// let layout = BreakpointLayout::from_items(vec![
///     PlacementRect::new("a", 0, 0, 3, 2),
///     PlacementRect::new("b", 0, 2, 3, 2),
/// ]);
/// // Drag "b" on top of "a": "a" is pushed down below it.
/// let out = apply_change(&layout, "b", Change::Move { x: 0, y: 0 }, 8, CellSize::new(3, 2))
///     .expect("b exists");
/// assert_eq!(out.get("b").map(|r| (r.x, r.y)), Some((0, 0)));
/// assert_eq!(out.get("a").map(|r| (r.x, r.y)), Some((0, 2)));
/// ```
pub fn apply_change(
    layout: &BreakpointLayout,
    id: &str,
    change: Change,
    cols: u16,
    min: CellSize,
) -> Option<BreakpointLayout> {
    let current = layout.get(id)?.clone();
    let target = match change {
        Change::Move { x, y } => {
            let mut moved = current;
            moved.x = to_cell(x);
            moved.y = to_cell(y);
            clamp_position(moved, min, cols)
        }
        Change::Resize { w, h } => {
            let mut resized = current;
            resized.w = to_cell(w);
            resized.h = to_cell(h);
            clamp_size(resized, min, cols)
        }
    };

    let others: Vec<PlacementRect> = layout
        .iter()
        .filter(|r| r.id != id)
        .cloned()
        .collect();
    let settled = settle(Some(target), others);
    Some(finish(layout, settled))
}

/// Repairs an arbitrary layout: clamps every rectangle into the grid,
/// resolves overlaps and compacts vertically.
///
/// `min_of` supplies the minimum size of each widget id. Applying
/// `compact` to its own output returns an identical layout.
pub fn compact(
    layout: &BreakpointLayout,
    cols: u16,
    min_of: impl Fn(&str) -> CellSize,
) -> BreakpointLayout {
    let clamped: Vec<PlacementRect> = layout
        .iter()
        .map(|r| clamp_position(r.clone(), min_of(&r.id), cols))
        .collect();
    let settled = settle(None, clamped);
    finish(layout, settled)
}

/// Returns `true` if `layout` is already in a state placement can produce:
/// ids are unique, every rectangle lies inside the grid at no less than its
/// minimum size, and no two rectangles overlap.
///
/// Gaps are allowed, so a layout that is valid is not necessarily compact.
pub fn is_valid(layout: &BreakpointLayout, cols: u16, min_of: impl Fn(&str) -> CellSize) -> bool {
    let mut ids = HashSet::new();
    layout.iter().all(|r| {
        ids.insert(r.id.as_str()) && clamp_position(r.clone(), min_of(&r.id), cols) == *r
    }) && !layout.has_collisions()
}

/// Finds the first free position for a rectangle of `size`, scanning rows
/// top-down and columns left-to-right.
///
/// The width is clipped to `cols`. A position always exists: the row just
/// below the current layout is free.
pub fn first_fit(layout: &BreakpointLayout, id: &str, size: CellSize, cols: u16) -> PlacementRect {
    let cols = cols.max(1);
    let w = size.w.clamp(1, cols);
    let h = size.h.max(1);
    for y in 0..=layout.height() {
        for x in 0..=(cols - w) {
            let candidate = PlacementRect::new(id, x, y, w, h);
            if !layout.iter().any(|r| r.overlaps(&candidate)) {
                return candidate;
            }
        }
    }
    PlacementRect::new(id, 0, layout.height(), w, h)
}

/// Moves every rectangle in `others` down until it overlaps nothing that
/// settled before it. `fixed`, if any, settles first and never moves.
fn settle(fixed: Option<PlacementRect>, others: Vec<PlacementRect>) -> Vec<PlacementRect> {
    let mut queue: Vec<(usize, PlacementRect)> = others.into_iter().enumerate().collect();
    queue.sort_by_key(|(index, r)| (r.y, r.x, *index));

    let mut settled: Vec<PlacementRect> = fixed.into_iter().collect();
    for (_, mut rect) in queue {
        while let Some(blocker) = settled.iter().find(|s| s.overlaps(&rect)) {
            rect.y = blocker.bottom();
        }
        settled.push(rect);
    }
    settled
}

/// Compacts `settled` vertically and returns it in the insertion order of
/// `before`, using the positions in `before` as tie-breakers.
fn finish(before: &BreakpointLayout, settled: Vec<PlacementRect>) -> BreakpointLayout {
    let original: HashMap<&str, (usize, u16, u16)> = before
        .iter()
        .enumerate()
        .map(|(i, r)| (r.id.as_str(), (i, r.y, r.x)))
        .collect();

    let compacted = compact_vertical(settled, |r| {
        original
            .get(r.id.as_str())
            .map(|(i, y, x)| (*y, *x, *i))
            .unwrap_or((r.y, r.x, usize::MAX))
    });

    let mut by_id: HashMap<String, PlacementRect> =
        compacted.into_iter().map(|r| (r.id.clone(), r)).collect();
    let items = before
        .iter()
        .filter_map(|r| by_id.remove(&r.id))
        .collect();
    BreakpointLayout::from_items(items)
}

/// Pulls every rectangle up as far as possible.
///
/// Rectangles are processed by current `y`, then `x`, then `tie_break`.
/// Each one rests on the lowest bottom edge among already-compacted
/// rectangles sharing its columns that lie fully above it.
fn compact_vertical<K: Ord>(
    mut items: Vec<PlacementRect>,
    tie_break: impl Fn(&PlacementRect) -> K,
) -> Vec<PlacementRect> {
    items.sort_by(|a, b| (a.y, a.x, tie_break(a)).cmp(&(b.y, b.x, tie_break(b))));

    let mut placed: Vec<PlacementRect> = Vec::with_capacity(items.len());
    for mut rect in items {
        rect.y = placed
            .iter()
            .filter(|p| p.overlaps_horizontally(&rect) && p.bottom() <= rect.y)
            .map(PlacementRect::bottom)
            .max()
            .unwrap_or(0);
        while let Some(blocker) = placed.iter().find(|p| p.overlaps(&rect)) {
            rect.y = blocker.bottom();
        }
        placed.push(rect);
    }
    placed
}
