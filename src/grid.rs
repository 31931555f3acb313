use serde::Serialize;

use crate::config::GridSize;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Vector2i {
    pub x: i32,
    pub y: i32,
}

impl Vector2i {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, grid: GridSize) -> bool {
        let bound = grid.bound();
        self.x >= 0 && self.y >= 0 && self.x < bound && self.y < bound
    }

    /// Adds `delta` and wraps the result into `[0, N)` on each axis independently.
    #[must_use]
    pub fn wrapping_add(self, delta: Self, grid: GridSize) -> Self {
        debug_assert!(grid.side > 0);
        Self {
            x: wrap_axis(self.x + delta.x, grid.bound()),
            y: wrap_axis(self.y + delta.y, grid.bound()),
        }
    }

    /// Iterates every cell of `grid` in row-major order.
    pub fn all_cells(grid: GridSize) -> impl Iterator<Item = Self> {
        let bound = grid.bound();
        (0..bound).flat_map(move |y| (0..bound).map(move |x| Self { x, y }))
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    let wrapped = value % upper_bound;
    if wrapped < 0 {
        wrapped + upper_bound
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;

    use super::Vector2i;

    #[test]
    fn wrapping_keeps_coordinates_inside_bounds() {
        let grid = GridSize::new(10);

        let left = Vector2i::new(0, 3).wrapping_add(Vector2i::new(-1, 0), grid);
        let bottom = Vector2i::new(4, 9).wrapping_add(Vector2i::new(0, 1), grid);

        assert_eq!(left, Vector2i::new(9, 3));
        assert_eq!(bottom, Vector2i::new(4, 0));
    }

    #[test]
    fn interior_addition_does_not_wrap() {
        let moved = Vector2i::new(3, 3).wrapping_add(Vector2i::new(1, 0), GridSize::new(8));
        assert_eq!(moved, Vector2i::new(4, 3));
    }

    #[test]
    fn bounds_check_matches_grid_side() {
        let grid = GridSize::new(4);
        assert!(Vector2i::new(3, 0).is_within_bounds(grid));
        assert!(!Vector2i::new(4, 0).is_within_bounds(grid));
        assert!(!Vector2i::new(0, -1).is_within_bounds(grid));
    }

    #[test]
    fn all_cells_is_row_major() {
        let cells: Vec<_> = Vector2i::all_cells(GridSize::new(2)).collect();
        assert_eq!(
            cells,
            vec![
                Vector2i::new(0, 0),
                Vector2i::new(1, 0),
                Vector2i::new(0, 1),
                Vector2i::new(1, 1),
            ]
        );
    }
}
