use std::collections::HashSet;

use rand::Rng;

use crate::config::GridSize;
use crate::error::SpawnError;
use crate::grid::Vector2i;

/// Random draws tried before falling back to a full-board scan.
pub const MAX_SPAWN_ATTEMPTS: usize = 64;

/// Places food on cells the snake does not occupy.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FoodSpawner {
    grid: GridSize,
}

impl FoodSpawner {
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self { grid }
    }

    /// Picks a uniformly random free cell.
    ///
    /// Rejection sampling covers the common sparse board. Once
    /// [`MAX_SPAWN_ATTEMPTS`] draws have all hit `occupied`, the board is
    /// scanned and one free cell is chosen among all candidates, so the call
    /// always terminates. A board with no free cell reports
    /// [`SpawnError::BoardFull`].
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        occupied: &HashSet<Vector2i>,
        rng: &mut R,
    ) -> Result<Vector2i, SpawnError> {
        if occupied.len() < self.grid.total_cells() {
            let bound = self.grid.bound();
            for _ in 0..MAX_SPAWN_ATTEMPTS {
                let cell = Vector2i::new(rng.gen_range(0..bound), rng.gen_range(0..bound));
                if !occupied.contains(&cell) {
                    return Ok(cell);
                }
            }
            tracing::trace!(
                occupied = occupied.len(),
                "spawn sampling exhausted, scanning board"
            );
        }

        spawn_position(rng, self.grid, occupied)
    }
}

/// Chooses uniformly among every free cell found by a row-major scan.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    grid: GridSize,
    occupied: &HashSet<Vector2i>,
) -> Result<Vector2i, SpawnError> {
    let candidates: Vec<Vector2i> = Vector2i::all_cells(grid)
        .filter(|cell| !occupied.contains(cell))
        .collect();

    if candidates.is_empty() {
        return Err(SpawnError::BoardFull {
            grid_size: grid.side,
        });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::error::SpawnError;
    use crate::grid::Vector2i;

    use super::{FoodSpawner, spawn_position};

    #[test]
    fn food_spawn_never_overlaps_occupied_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let spawner = FoodSpawner::new(GridSize::new(8));
        let occupied: HashSet<_> = [(0, 0), (1, 0), (2, 0), (2, 1), (5, 5), (7, 7)]
            .into_iter()
            .map(|(x, y)| Vector2i::new(x, y))
            .collect();

        for _ in 0..1000 {
            let cell = spawner
                .spawn(&occupied, &mut rng)
                .expect("board has free cells");
            assert!(!occupied.contains(&cell));
            assert!(cell.is_within_bounds(GridSize::new(8)));
        }
    }

    #[test]
    fn nearly_full_board_finds_the_last_free_cell() {
        let grid = GridSize::new(6);
        let free = Vector2i::new(3, 4);
        let occupied: HashSet<_> = Vector2i::all_cells(grid).filter(|c| *c != free).collect();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..20 {
            assert_eq!(FoodSpawner::new(grid).spawn(&occupied, &mut rng), Ok(free));
        }
    }

    #[test]
    fn full_board_reports_board_full() {
        let grid = GridSize::new(3);
        let occupied: HashSet<_> = Vector2i::all_cells(grid).collect();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            FoodSpawner::new(grid).spawn(&occupied, &mut rng),
            Err(SpawnError::BoardFull { grid_size: 3 })
        );
        assert!(spawn_position(&mut rng, grid, &occupied).is_err());
    }

    #[test]
    fn same_seed_spawns_same_cells() {
        let spawner = FoodSpawner::new(GridSize::new(16));
        let occupied = HashSet::from([Vector2i::new(8, 8)]);
        let mut first = StdRng::seed_from_u64(99);
        let mut second = StdRng::seed_from_u64(99);

        for _ in 0..10 {
            assert_eq!(
                spawner.spawn(&occupied, &mut first),
                spawner.spawn(&occupied, &mut second)
            );
        }
    }
}
