//! Ways of putting life onto an empty grid.

use rand::Rng;
use rand::rngs::ThreadRng;

use super::{Cell, Grid, PatternKind};
use crate::error::{LifeError, Result};

/// Fills a freshly created grid. Pools call this once per grid.
pub trait Seeder {
    fn seed(&mut self, grid: &mut Grid);
}

impl<F: FnMut(&mut Grid)> Seeder for F {
    fn seed(&mut self, grid: &mut Grid) {
        self(grid)
    }
}

/// Seeder backed by [`seed_random`]
#[derive(Debug, Clone)]
pub struct RandomSeeder<R> {
    rng: R,
}

impl RandomSeeder<ThreadRng> {
    pub fn thread() -> Self {
        Self { rng: rand::rng() }
    }
}

impl<R: Rng> RandomSeeder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Seeder for RandomSeeder<R> {
    fn seed(&mut self, grid: &mut Grid) {
        seed_random(grid, &mut self.rng);
    }
}

/// Bring a random number of distinct cells to life.
///
/// The target is drawn from `[1, area)` (a single-cell grid gets its one
/// cell). Draws that land on a live cell are retried. The target is capped
/// at the number of dead cells so a saturated grid cannot spin forever.
/// Returns how many cells were brought to life.
pub fn seed_random<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> usize {
    let (length, width) = grid.dimensions();
    let area = grid.area();
    let target = if area > 1 { rng.random_range(1..area) } else { 1 };
    let target = target.min(area - grid.count_alive());

    let mut placed = 0;
    while placed < target {
        let x = rng.random_range(0..length);
        let y = rng.random_range(0..width);
        if grid.get(x, y) == Some(Cell::Dead) {
            grid.set_wrapped(x, y, Cell::Alive);
            placed += 1;
        }
    }

    grid.count_alive();
    placed
}

/// One seeding request from whoever drives the simulation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seed {
    /// Flip each listed (x, y)
    Toggle(Vec<(usize, usize)>),
    /// Stamp a library pattern anchored at (x, y)
    Pattern { kind: PatternKind, x: usize, y: usize },
    /// Random fill
    Random,
}

impl Seed {
    /// Apply the request to `grid`. Out-of-range coordinates reject the
    /// whole request before any cell changes.
    pub fn apply<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> Result<()> {
        match self {
            Seed::Toggle(coords) => {
                let (length, width) = grid.dimensions();
                if let Some(&(x, y)) = coords.iter().find(|&&(x, y)| x >= length || y >= width) {
                    return Err(LifeError::CoordinateOutOfRange { x, y, length, width });
                }
                for &(x, y) in coords {
                    grid.toggle_cell(x, y)?;
                }
                grid.count_alive();
            }
            Seed::Pattern { kind, x, y } => kind.stamp(grid, *x, *y)?,
            Seed::Random => {
                seed_random(grid, rng);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_seed_count_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut grid = Grid::new(8, 6).unwrap();
            let placed = seed_random(&mut grid, &mut rng);
            assert!((1..48).contains(&placed));
            assert_eq!(grid.alive_count(), placed);
        }
    }

    #[test]
    fn test_random_seed_single_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new(1, 1).unwrap();
        assert_eq!(seed_random(&mut grid, &mut rng), 1);
        assert_eq!(grid.get(0, 0), Some(Cell::Alive));
    }

    #[test]
    fn test_random_seed_saturated_grid_terminates() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(3, 3).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                grid.set(x, y, Cell::Alive).unwrap();
            }
        }
        assert_eq!(seed_random(&mut grid, &mut rng), 0);
        assert_eq!(grid.alive_count(), 9);
    }

    #[test]
    fn test_random_seeder_and_closure() {
        let mut seeder = RandomSeeder::new(StdRng::seed_from_u64(11));
        let mut grid = Grid::new(10, 10).unwrap();
        seeder.seed(&mut grid);
        assert!(grid.alive_count() >= 1);

        let mut corner = |grid: &mut Grid| {
            grid.set(0, 0, Cell::Alive).unwrap();
            grid.count_alive();
        };
        let mut grid = Grid::new(4, 4).unwrap();
        corner.seed(&mut grid);
        assert_eq!(grid.alive_count(), 1);
    }

    #[test]
    fn test_toggle_seed_is_all_or_nothing() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut grid = Grid::new(5, 5).unwrap();

        let bad = Seed::Toggle(vec![(1, 1), (5, 0)]);
        assert!(bad.apply(&mut grid, &mut rng).is_err());
        assert_eq!(grid.get(1, 1), Some(Cell::Dead));

        let good = Seed::Toggle(vec![(1, 1), (2, 2), (1, 1), (3, 3)]);
        good.apply(&mut grid, &mut rng).unwrap();
        assert_eq!(grid.alive_count(), 2);
        assert_eq!(grid.get(1, 1), Some(Cell::Dead));
    }

    #[test]
    fn test_pattern_seed() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut grid = Grid::new(10, 10).unwrap();
        Seed::Pattern { kind: PatternKind::Blinker, x: 2, y: 2 }
            .apply(&mut grid, &mut rng)
            .unwrap();
        assert_eq!(grid.alive_count(), 3);
        assert_eq!(grid.get(3, 3), Some(Cell::Alive));
    }

    proptest! {
        #[test]
        fn test_random_seed_bounds(length in 1usize..16, width in 1usize..16, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut grid = Grid::new(length, width).unwrap();
            let placed = seed_random(&mut grid, &mut rng);
            let area = length * width;

            prop_assert!(placed >= 1);
            prop_assert!(placed < area || area == 1);
            prop_assert_eq!(grid.alive_count(), placed);
        }
    }
}
