use std::collections::{HashSet, VecDeque};

use crate::config::GridSize;
use crate::error::ConfigError;
use crate::grid::Vector2i;
use crate::heading::Heading;

/// Ordered snake segments, head first, plus the heading of the last move.
///
/// The body is never empty. [`SnakeBody::advance`] produces the next body
/// instead of moving this one, so every tick can be compared against the
/// state it came from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SnakeBody {
    cells: VecDeque<Vector2i>,
    last_heading: Heading,
    grid: GridSize,
}

impl SnakeBody {
    /// Creates a body from explicit segments (front is head).
    ///
    /// Segments need not be adjacent; they only have to lie on the grid.
    pub fn new(
        segments: Vec<Vector2i>,
        last_heading: Heading,
        grid: GridSize,
    ) -> Result<Self, ConfigError> {
        if segments.is_empty() {
            return Err(ConfigError::EmptyBody);
        }
        if let Some(&cell) = segments.iter().find(|cell| !cell.is_within_bounds(grid)) {
            return Err(ConfigError::CellOutOfBounds {
                cell,
                grid_size: grid.side,
            });
        }

        Ok(Self {
            cells: VecDeque::from(segments),
            last_heading,
            grid,
        })
    }

    /// Seeds a vertical body with its head at the grid centre, facing up.
    ///
    /// The tail trails below the head and wraps at the bottom edge. `length`
    /// must be between 1 and the grid side, as checked by
    /// [`SessionConfig::validate`](crate::config::SessionConfig::validate).
    #[must_use]
    pub fn seeded_vertical(grid: GridSize, length: u16) -> Self {
        debug_assert!(length >= 1 && length <= grid.side);

        let centre = grid.bound() / 2;
        let head = Vector2i::new(centre, centre);
        let down = Heading::Down.delta();

        let mut cells = VecDeque::with_capacity(usize::from(length));
        let mut cell = head;
        for _ in 0..length {
            cells.push_back(cell);
            cell = cell.wrapping_add(down, grid);
        }

        Self {
            cells,
            last_heading: Heading::Up,
            grid,
        }
    }

    /// Returns the cell the head moves into when stepping along `heading`.
    #[must_use]
    pub fn next_head(&self, heading: Heading) -> Vector2i {
        self.head().wrapping_add(heading.delta(), self.grid)
    }

    /// Returns the body after one movement step.
    ///
    /// The new head is prepended. Without growth the tail is dropped, so the
    /// length is unchanged; with growth the tail stays and the body gains one
    /// segment.
    #[must_use]
    pub fn advance(&self, heading: Heading, grew: bool) -> Self {
        let mut cells = self.cells.clone();
        cells.push_front(self.next_head(heading));
        if !grew {
            let _ = cells.pop_back();
        }

        Self {
            cells,
            last_heading: heading,
            grid: self.grid,
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Vector2i {
        *self
            .cells
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position. Equals the head for a one-cell body.
    #[must_use]
    pub fn tail(&self) -> Vector2i {
        *self
            .cells
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Vector2i) -> bool {
        self.cells.contains(&position)
    }

    /// Returns the set of cells covered by the body.
    #[must_use]
    pub fn occupied_cells(&self) -> HashSet<Vector2i> {
        self.cells.iter().copied().collect()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true when there are no segments. Construction rejects that.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Heading of the most recent move, used to reject reversals.
    #[must_use]
    pub fn last_heading(&self) -> Heading {
        self.last_heading
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Iterates over body segments from head to tail.
    pub fn cells(&self) -> impl Iterator<Item = &Vector2i> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::error::ConfigError;
    use crate::grid::Vector2i;
    use crate::heading::Heading;

    use super::SnakeBody;

    fn body(cells: &[(i32, i32)], heading: Heading, side: u16) -> SnakeBody {
        SnakeBody::new(
            cells.iter().map(|&(x, y)| Vector2i::new(x, y)).collect(),
            heading,
            GridSize::new(side),
        )
        .expect("test body should be valid")
    }

    #[test]
    fn advance_shifts_without_growth() {
        let snake = body(&[(4, 4), (4, 5), (4, 6)], Heading::Up, 8);

        let next = snake.advance(Heading::Up, false);

        assert_eq!(next.len(), 3);
        assert_eq!(
            next.cells().copied().collect::<Vec<_>>(),
            vec![Vector2i::new(4, 3), Vector2i::new(4, 4), Vector2i::new(4, 5)]
        );
    }

    #[test]
    fn growth_keeps_previous_tail() {
        let snake = body(&[(4, 4), (4, 5), (4, 6)], Heading::Up, 8);

        let next = snake.advance(Heading::Left, true);

        assert_eq!(next.len(), 4);
        assert_eq!(next.head(), Vector2i::new(3, 4));
        assert_eq!(next.tail(), Vector2i::new(4, 6));
        assert_eq!(next.last_heading(), Heading::Left);
    }

    #[test]
    fn advance_leaves_original_untouched() {
        let snake = body(&[(1, 1), (1, 2)], Heading::Up, 8);
        let before = snake.clone();

        let _ = snake.advance(Heading::Right, true);

        assert_eq!(snake, before);
    }

    #[test]
    fn moving_right_off_the_edge_wraps_to_column_zero() {
        let snake = body(&[(7, 2)], Heading::Right, 8);
        assert_eq!(snake.advance(Heading::Right, false).head(), Vector2i::new(0, 2));
    }

    #[test]
    fn moving_up_off_the_edge_wraps_to_last_row() {
        let snake = body(&[(3, 0)], Heading::Up, 8);
        assert_eq!(snake.advance(Heading::Up, false).head(), Vector2i::new(3, 7));
    }

    #[test]
    fn seeded_body_is_a_vertical_column_below_the_centre() {
        let snake = SnakeBody::seeded_vertical(GridSize::new(8), 3);

        assert_eq!(
            snake.cells().copied().collect::<Vec<_>>(),
            vec![Vector2i::new(4, 4), Vector2i::new(4, 5), Vector2i::new(4, 6)]
        );
        assert_eq!(snake.last_heading(), Heading::Up);
    }

    #[test]
    fn seeded_body_wraps_without_overlap_at_full_column() {
        let snake = SnakeBody::seeded_vertical(GridSize::new(4), 4);

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.occupied_cells().len(), 4);
        assert_eq!(snake.tail(), Vector2i::new(2, 1));
    }

    #[test]
    fn constructed_bodies_are_never_empty() {
        assert!(!body(&[(0, 0)], Heading::Up, 4).is_empty());
        assert!(!SnakeBody::seeded_vertical(GridSize::new(4), 1).is_empty());
    }

    #[test]
    fn construction_rejects_empty_and_out_of_bounds_bodies() {
        let grid = GridSize::new(4);

        assert!(matches!(
            SnakeBody::new(Vec::new(), Heading::Up, grid),
            Err(ConfigError::EmptyBody)
        ));
        assert!(matches!(
            SnakeBody::new(vec![Vector2i::new(4, 0)], Heading::Up, grid),
            Err(ConfigError::CellOutOfBounds { .. })
        ));
    }

    #[test]
    fn head_moves_one_orthogonal_step_per_advance() {
        let grid = GridSize::new(5);
        let mut snake = SnakeBody::seeded_vertical(grid, 3);
        let turns = [
            Heading::Up,
            Heading::Left,
            Heading::Left,
            Heading::Down,
            Heading::Right,
        ];

        for heading in turns.iter().cycle().take(40) {
            let next = snake.advance(*heading, false);
            assert_eq!(next.head(), snake.head().wrapping_add(heading.delta(), grid));
            assert_eq!(next.len(), snake.len());
            snake = next;
        }
    }
}
