//! Layout model: rectangles per breakpoint.

use super::breakpoint::Breakpoint;
use super::rect::PlacementRect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static EMPTY_LAYOUT: BreakpointLayout = BreakpointLayout { items: Vec::new() };

/// The rectangles of every widget on one breakpoint.
///
/// Items keep their insertion order, which is also the order they are
/// serialized in. At most one rectangle exists per widget id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakpointLayout {
    items: Vec<PlacementRect>,
}

impl BreakpointLayout {
    /// Creates an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a layout from rectangles. Later duplicates of an id are dropped.
    pub fn from_items(items: Vec<PlacementRect>) -> Self {
        let mut layout = Self::new();
        for item in items {
            if !layout.contains(&item.id) {
                layout.items.push(item);
            }
        }
        layout
    }

    /// All rectangles in insertion order.
    pub fn items(&self) -> &[PlacementRect] {
        &self.items
    }

    /// Iterates over the rectangles.
    pub fn iter(&self) -> impl Iterator<Item = &PlacementRect> {
        self.items.iter()
    }

    /// Number of rectangles.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the layout holds no rectangles.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rectangle of the widget `id`, if present.
    pub fn get(&self, id: &str) -> Option<&PlacementRect> {
        self.items.iter().find(|r| r.id == id)
    }

    /// Returns `true` if the widget `id` has a rectangle here.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Inserts a rectangle, replacing any existing one for the same id in place.
    pub fn upsert(&mut self, rect: PlacementRect) {
        match self.items.iter_mut().find(|r| r.id == rect.id) {
            Some(existing) => *existing = rect,
            None => self.items.push(rect),
        }
    }

    /// Removes and returns the rectangle of the widget `id`.
    pub fn remove(&mut self, id: &str) -> Option<PlacementRect> {
        let pos = self.items.iter().position(|r| r.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Keeps only rectangles for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&PlacementRect) -> bool) {
        self.items.retain(keep);
    }

    /// Row just past the lowest rectangle (0 for an empty layout).
    pub fn height(&self) -> u16 {
        self.items.iter().map(PlacementRect::bottom).max().unwrap_or(0)
    }

    /// Pairs of widget ids whose rectangles overlap.
    pub fn collisions(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for (i, a) in self.items.iter().enumerate() {
            for b in &self.items[i + 1..] {
                if a.overlaps(b) {
                    pairs.push((a.id.as_str(), b.id.as_str()));
                }
            }
        }
        pairs
    }

    /// Returns `true` if any two rectangles overlap.
    pub fn has_collisions(&self) -> bool {
        !self.collisions().is_empty()
    }

    /// The rectangle covering cell (`col`, `row`), if any.
    pub fn at_cell(&self, col: u16, row: u16) -> Option<&PlacementRect> {
        self.items.iter().find(|r| r.contains_cell(col, row))
    }
}

/// One [`BreakpointLayout`] per breakpoint.
///
/// Serializes as `{ "lg": [..], "md": [..], "sm": [..], "xs": [..] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layouts {
    by_breakpoint: BTreeMap<Breakpoint, BreakpointLayout>,
}

impl Layouts {
    /// Creates a set of four empty layouts.
    pub fn new() -> Self {
        let by_breakpoint = Breakpoint::ALL
            .iter()
            .map(|bp| (*bp, BreakpointLayout::new()))
            .collect();
        Self { by_breakpoint }
    }

    /// Layout of the given breakpoint (empty if never set).
    pub fn get(&self, bp: Breakpoint) -> &BreakpointLayout {
        self.by_breakpoint.get(&bp).unwrap_or(&EMPTY_LAYOUT)
    }

    /// Mutable layout of the given breakpoint, created empty if missing.
    pub fn get_mut(&mut self, bp: Breakpoint) -> &mut BreakpointLayout {
        self.by_breakpoint.entry(bp).or_default()
    }

    /// Replaces the layout of the given breakpoint.
    pub fn set(&mut self, bp: Breakpoint, layout: BreakpointLayout) {
        self.by_breakpoint.insert(bp, layout);
    }

    /// Removes the widget `id` from every breakpoint.
    ///
    /// Returns the number of rectangles removed.
    pub fn remove_widget(&mut self, id: &str) -> usize {
        self.by_breakpoint
            .values_mut()
            .filter_map(|layout| layout.remove(id))
            .count()
    }

    /// Iterates over `(breakpoint, layout)` pairs, widest first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &BreakpointLayout)> {
        self.by_breakpoint.iter().map(|(bp, l)| (*bp, l))
    }
}
