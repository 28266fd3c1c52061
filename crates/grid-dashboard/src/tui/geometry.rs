//! Mapping between grid cells and terminal cells.
//!
//! Grid column `c` starts at terminal column `c * width / cols`, so columns
//! differ in width by at most one. Each grid row is `row_height` terminal
//! rows tall and the view scrolls by whole grid rows.

use crate::layout::PlacementRect;
use ratatui::layout::Rect;

/// Where the grid is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// Terminal area of the grid.
    pub area: Rect,
    /// Grid columns of the active breakpoint.
    pub cols: u16,
    /// Terminal rows per grid row.
    pub row_height: u16,
    /// First visible grid row.
    pub scroll: u16,
}

impl GridGeometry {
    /// Creates a geometry. Zero columns or row height are raised to one.
    pub fn new(area: Rect, cols: u16, row_height: u16, scroll: u16) -> Self {
        Self {
            area,
            cols: cols.max(1),
            row_height: row_height.max(1),
            scroll,
        }
    }

    /// Terminal column where grid column `col` starts.
    pub fn col_x(&self, col: u16) -> u16 {
        let col = u32::from(col.min(self.cols));
        let offset = col * u32::from(self.area.width) / u32::from(self.cols);
        self.area.x + offset as u16
    }

    /// Terminal row where grid row `row` starts. Negative above the view.
    fn row_y(&self, row: u16) -> i32 {
        i32::from(self.area.y) + (i32::from(row) - i32::from(self.scroll)) * i32::from(self.row_height)
    }

    /// Terminal rectangle of a placement, clipped to the grid area.
    ///
    /// `None` when nothing of it is visible.
    pub fn cell_rect(&self, rect: &PlacementRect) -> Option<Rect> {
        let left = self.col_x(rect.x);
        let right = self.col_x(rect.right());
        let top = self.row_y(rect.y).max(i32::from(self.area.y));
        let bottom = self.row_y(rect.bottom()).min(i32::from(self.area.bottom()));
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(left, top as u16, right - left, (bottom - top) as u16))
    }

    /// Grid cell under the terminal position, if it is inside the grid area.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<(u16, u16)> {
        if !self.contains(column, row) {
            return None;
        }
        let rel = u32::from(column - self.area.x);
        // Largest grid column whose start is at or left of `rel`.
        let col = ((rel + 1) * u32::from(self.cols) - 1) / u32::from(self.area.width);
        let grid_row = (row - self.area.y) / self.row_height + self.scroll;
        Some((col.min(u32::from(self.cols) - 1) as u16, grid_row))
    }

    /// Returns `true` if the terminal position is inside the grid area.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.right()
            && row >= self.area.y
            && row < self.area.bottom()
    }

    /// Returns `true` if the position is the bottom-right corner of the
    /// placement as drawn, which starts a resize instead of a drag.
    pub fn is_resize_handle(&self, rect: &PlacementRect, column: u16, row: u16) -> bool {
        if self.row_y(rect.bottom()) > i32::from(self.area.bottom()) {
            return false;
        }
        self.cell_rect(rect)
            .is_some_and(|r| column + 1 == r.right() && row + 1 == r.bottom())
    }

    /// Grid rows that fit in the area.
    pub fn visible_rows(&self) -> u16 {
        self.area.height / self.row_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> GridGeometry {
        GridGeometry::new(Rect::new(0, 1, 80, 12), 8, 3, 0)
    }

    #[test]
    fn columns_split_evenly() {
        let g = geometry();
        assert_eq!(g.col_x(0), 0);
        assert_eq!(g.col_x(1), 10);
        assert_eq!(g.col_x(8), 80);
    }

    #[test]
    fn uneven_width_still_covers_area() {
        let g = GridGeometry::new(Rect::new(0, 0, 20, 6), 3, 2, 0);
        assert_eq!(g.col_x(1), 6);
        assert_eq!(g.col_x(2), 13);
        assert_eq!(g.col_x(3), 20);
        for column in 0..20 {
            let (col, _) = g.cell_at(column, 0).expect("inside");
            assert!(g.col_x(col) <= column && column < g.col_x(col + 1));
        }
    }

    #[test]
    fn cell_rect_maps_cells_to_terminal() {
        let g = geometry();
        let r = g.cell_rect(&PlacementRect::new("a", 1, 1, 3, 2)).expect("visible");
        assert_eq!(r, Rect::new(10, 4, 30, 6));
    }

    #[test]
    fn cell_rect_clips_to_area() {
        let g = geometry();
        // rows 3..5 start at terminal row 10; area ends at 13
        let r = g.cell_rect(&PlacementRect::new("a", 0, 3, 2, 2)).expect("visible");
        assert_eq!(r, Rect::new(0, 10, 20, 3));
        assert!(g.cell_rect(&PlacementRect::new("b", 0, 4, 2, 2)).is_none());
    }

    #[test]
    fn scroll_hides_rows_above() {
        let g = GridGeometry::new(Rect::new(0, 1, 80, 12), 8, 3, 2);
        assert!(g.cell_rect(&PlacementRect::new("a", 0, 0, 2, 2)).is_none());
        let r = g.cell_rect(&PlacementRect::new("b", 0, 1, 2, 2)).expect("visible");
        assert_eq!(r, Rect::new(0, 1, 20, 3));
        assert_eq!(g.cell_at(0, 1), Some((0, 2)));
    }

    #[test]
    fn cell_at_outside_is_none() {
        let g = geometry();
        assert_eq!(g.cell_at(0, 0), None);
        assert_eq!(g.cell_at(80, 5), None);
        assert_eq!(g.cell_at(79, 12), Some((7, 3)));
        assert_eq!(g.cell_at(15, 4), Some((1, 1)));
    }

    #[test]
    fn resize_handle_is_bottom_right_corner() {
        let g = geometry();
        let rect = PlacementRect::new("a", 1, 1, 3, 2);
        assert!(g.is_resize_handle(&rect, 39, 9));
        assert!(!g.is_resize_handle(&rect, 38, 9));
        assert!(!g.is_resize_handle(&rect, 39, 8));
    }

    #[test]
    fn clipped_rect_has_no_resize_handle() {
        let g = geometry();
        let rect = PlacementRect::new("a", 0, 3, 2, 2);
        assert!(!g.is_resize_handle(&rect, 19, 12));
    }

    #[test]
    fn visible_rows() {
        assert_eq!(geometry().visible_rows(), 4);
    }
}
