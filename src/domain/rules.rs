//! Conway's B3/S23 rule engine.
//!
//! Evaluation reads the current generation and records two coordinate
//! lists (cells to die, cells to be born); application writes them back
//! in a second pass, so a tick never reads a cell it has already written.

use super::{Cell, Grid};

type Coord = (usize, usize);

/// Owns the transient "to die" / "to be born" lists for one grid at a time.
/// Give each worker its own engine when ticking grids in parallel.
#[derive(Debug, Default, Clone)]
pub struct RuleEngine {
    to_die: Vec<Coord>,
    to_be_born: Vec<Coord>,
}

/// Map `coord` onto `[0, dim)`: toroidal when wrapping, `None` past an open edge
#[inline]
fn resolve(coord: isize, dim: usize, wrap: bool) -> Option<usize> {
    let dim = dim as isize;
    if wrap {
        Some(coord.rem_euclid(dim) as usize)
    } else {
        (0..dim).contains(&coord).then_some(coord as usize)
    }
}

/// Live cells in the 3x3 block around (x, y), the centre excluded once.
///
/// On a 1-wide axis every offset wraps back onto the cell itself, so tiny
/// grids count the same cell several times rather than failing.
pub fn count_live_neighbors(grid: &Grid, x: usize, y: usize, disable_wrap: bool) -> u8 {
    let (length, width) = grid.dimensions();
    let wrap = !disable_wrap;

    let block = (-1isize..=1)
        .flat_map(|dy| (-1isize..=1).map(move |dx| (dx, dy)))
        .filter_map(|(dx, dy)| {
            let nx = resolve(x as isize + dx, length, wrap)?;
            let ny = resolve(y as isize + dy, width, wrap)?;
            grid.get(nx, ny)
        })
        .filter(|cell| cell.is_alive())
        .count() as u8;

    match grid.get(x, y) {
        Some(Cell::Alive) => block - 1,
        _ => block,
    }
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record which cells change this tick. The grid is not touched.
    ///
    /// With `disable_wrap`, edges are open and the last row and last column
    /// are lethal: nothing survives or is born there.
    pub fn evaluate(&mut self, grid: &Grid, disable_wrap: bool) {
        self.to_die.clear();
        self.to_be_born.clear();

        let (length, width) = grid.dimensions();
        for (x, y, cell) in grid.iter_cells() {
            let on_lethal_edge = disable_wrap && (x == length - 1 || y == width - 1);
            let neighbors = count_live_neighbors(grid, x, y, disable_wrap);
            let next = cell.evolve(neighbors);

            match cell {
                Cell::Alive if on_lethal_edge || next == Cell::Dead => self.to_die.push((x, y)),
                Cell::Dead if !on_lethal_edge && next == Cell::Alive => {
                    self.to_be_born.push((x, y))
                }
                _ => {}
            }
        }
    }

    /// Write the recorded changes into `grid` and clear both lists
    pub fn apply(&mut self, grid: &mut Grid) {
        for (x, y) in self.to_die.drain(..) {
            grid.set_wrapped(x, y, Cell::Dead);
        }
        for (x, y) in self.to_be_born.drain(..) {
            grid.set_wrapped(x, y, Cell::Alive);
        }
    }

    /// Evaluate + apply, then refresh the alive count. Leaves the
    /// generation counter alone (pool ticks keep their own).
    pub fn step(&mut self, grid: &mut Grid, disable_wrap: bool) -> usize {
        self.evaluate(grid, disable_wrap);
        self.apply(grid);
        grid.count_alive()
    }

    /// One full generation for a single-instance game
    pub fn advance(&mut self, grid: &mut Grid, disable_wrap: bool) -> usize {
        let alive = self.step(grid, disable_wrap);
        grid.advance_generation();
        alive
    }

    /// Pending (to_die, to_be_born) lists from the last `evaluate`
    pub fn pending(&self) -> (&[Coord], &[Coord]) {
        (&self.to_die, &self.to_be_born)
    }
}
