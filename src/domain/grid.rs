use serde::{Deserialize, Serialize};

use super::Cell;
use crate::error::{LifeError, Result};

/// Grid is one fixed-size game field.
///
/// `length` is the horizontal extent (x), `width` the vertical extent (y).
/// Cells are stored row-major. The alive count is a cache refreshed by
/// [`Grid::count_alive`], never maintained incrementally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRecord", into = "GridRecord")]
pub struct Grid {
    length: usize,
    width: usize,
    cells: Vec<Cell>,
    generation: u64,
    alive_count: usize,
}

/// Unvalidated wire shape handed to serde.
#[derive(Serialize, Deserialize)]
struct GridRecord {
    generation: u64,
    rows: Vec<Vec<Cell>>,
}

impl TryFrom<GridRecord> for Grid {
    type Error = LifeError;

    fn try_from(record: GridRecord) -> Result<Self> {
        Grid::from_rows(record.rows, record.generation)
    }
}

impl From<Grid> for GridRecord {
    fn from(grid: Grid) -> Self {
        Self {
            generation: grid.generation,
            rows: grid.rows().map(<[Cell]>::to_vec).collect(),
        }
    }
}

impl Grid {
    /// Create a new grid with all cells dead, at generation 1
    pub fn new(length: usize, width: usize) -> Result<Self> {
        if length == 0 || width == 0 {
            return Err(LifeError::InvalidDimension { length, width });
        }
        Ok(Self {
            length,
            width,
            cells: vec![Cell::Dead; length * width],
            generation: 1,
            alive_count: 0,
        })
    }

    /// Rebuild a grid from its rows (top to bottom) and generation counter.
    /// Every row must have the same, non-zero length.
    pub fn from_rows(rows: Vec<Vec<Cell>>, generation: u64) -> Result<Self> {
        let width = rows.len();
        let length = rows.first().map_or(0, Vec::len);
        if length == 0 || rows.iter().any(|row| row.len() != length) {
            return Err(LifeError::InvalidDimension { length, width });
        }
        if generation == 0 {
            return Err(LifeError::configuration("generation must start at 1"));
        }

        let mut grid = Self {
            length,
            width,
            cells: rows.into_iter().flatten().collect(),
            generation,
            alive_count: 0,
        };
        grid.count_alive();
        Ok(grid)
    }

    /// Get grid dimensions as (length, width)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.length, self.width)
    }

    pub const fn length(&self) -> usize {
        self.length
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn area(&self) -> usize {
        self.length * self.width
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Alive cells as of the last [`Grid::count_alive`]
    pub const fn alive_count(&self) -> usize {
        self.alive_count
    }

    pub const fn dead_count(&self) -> usize {
        self.area() - self.alive_count
    }

    /// Convert 2D coordinates to 1D index
    const fn get_index(&self, x: usize, y: usize) -> usize {
        y * self.length + x
    }

    const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.length && y < self.width
    }

    fn check(&self, x: usize, y: usize) -> Result<usize> {
        if self.contains(x, y) {
            Ok(self.get_index(x, y))
        } else {
            Err(LifeError::CoordinateOutOfRange {
                x,
                y,
                length: self.length,
                width: self.width,
            })
        }
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.contains(x, y).then(|| self.cells[self.get_index(x, y)])
    }

    /// Set cell at position. The grid is untouched on error.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<()> {
        let idx = self.check(x, y)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Set cell using modulo addressing on both axes; any coordinate is legal
    pub fn set_wrapped(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.get_index(x % self.length, y % self.width);
        self.cells[idx] = cell;
    }

    /// Flip the cell at (x, y) and return its new state
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<Cell> {
        let idx = self.check(x, y)?;
        self.cells[idx] = self.cells[idx].toggle();
        Ok(self.cells[idx])
    }

    /// Scan every cell, cache and return the number alive
    pub fn count_alive(&mut self) -> usize {
        self.alive_count = self.cells.iter().filter(|cell| cell.is_alive()).count();
        self.alive_count
    }

    /// Clear all cells to dead state and reset the generation counter
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::Dead);
        self.alive_count = 0;
        self.generation = 1;
    }

    pub(crate) fn advance_generation(&mut self) {
        self.generation += 1;
    }

    /// Raw row-major cell storage
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows from top (y = 0) to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.length)
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &cell)| (idx % self.length, idx / self.length, cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_grid() {
        let mut grid = Grid::new(7, 4).unwrap();
        assert_eq!(grid.dimensions(), (7, 4));
        assert_eq!(grid.generation(), 1);
        assert_eq!(grid.count_alive(), 0);
        assert_eq!(grid.dead_count(), 28);
        assert_eq!(grid.area(), 28);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(LifeError::InvalidDimension { length: 0, width: 5 })
        ));
        assert!(Grid::new(5, 0).is_err());
    }

    #[test]
    fn test_toggle_and_count() {
        let mut grid = Grid::new(5, 5).unwrap();
        assert_eq!(grid.toggle_cell(1, 2).unwrap(), Cell::Alive);
        assert_eq!(grid.toggle_cell(4, 4).unwrap(), Cell::Alive);
        assert_eq!(grid.count_alive(), 2);
        assert_eq!(grid.count_alive(), 2);

        assert_eq!(grid.toggle_cell(1, 2).unwrap(), Cell::Dead);
        assert_eq!(grid.count_alive(), 1);
        assert_eq!(grid.dead_count(), 24);
    }

    #[test]
    fn test_out_of_range_leaves_grid_unchanged() {
        let mut grid = Grid::new(3, 2).unwrap();
        let before = grid.clone();

        assert!(matches!(
            grid.toggle_cell(3, 0),
            Err(LifeError::CoordinateOutOfRange { x: 3, y: 0, .. })
        ));
        assert!(grid.set(0, 2, Cell::Alive).is_err());
        assert_eq!(grid, before);
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_set_wrapped() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set_wrapped(5, 7, Cell::Alive);
        assert_eq!(grid.get(1, 1), Some(Cell::Alive));
    }

    #[test]
    fn test_rows_and_iter_cells() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(2, 1, Cell::Alive).unwrap();

        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[Cell::Dead, Cell::Dead, Cell::Alive]);

        let alive: Vec<_> = grid.iter_cells().filter(|(_, _, c)| c.is_alive()).collect();
        assert_eq!(alive, vec![(2, 1, Cell::Alive)]);
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![
            vec![Cell::Alive, Cell::Dead],
            vec![Cell::Dead, Cell::Alive],
            vec![Cell::Alive, Cell::Alive],
        ];
        let grid = Grid::from_rows(rows, 12).unwrap();
        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.generation(), 12);
        assert_eq!(grid.alive_count(), 4);
        assert_eq!(grid.get(1, 1), Some(Cell::Alive));
    }

    #[test]
    fn test_from_rows_rejects_ragged_and_empty() {
        let ragged = vec![vec![Cell::Dead, Cell::Dead], vec![Cell::Dead]];
        assert!(Grid::from_rows(ragged, 1).is_err());
        assert!(Grid::from_rows(Vec::new(), 1).is_err());
        assert!(Grid::from_rows(vec![vec![Cell::Dead]], 0).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set(0, 0, Cell::Alive).unwrap();
        grid.set(3, 2, Cell::Alive).unwrap();
        grid.advance_generation();
        grid.count_alive();

        let encoded = toml::to_string(&grid).unwrap();
        let decoded: Grid = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, grid);
        assert_eq!(decoded.generation(), 2);
        assert_eq!(decoded.alive_count(), 2);
    }

    #[test]
    fn test_serde_rejects_invalid_payloads() {
        let ragged = r#"
            generation = 3
            rows = [["Alive", "Dead"], ["Dead"]]
        "#;
        assert!(toml::from_str::<Grid>(ragged).is_err());

        let generation_zero = r#"
            generation = 0
            rows = [["Alive"]]
        "#;
        assert!(toml::from_str::<Grid>(generation_zero).is_err());
    }

    #[test]
    fn test_clear_resets_generation() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, Cell::Alive).unwrap();
        grid.advance_generation();
        grid.count_alive();

        grid.clear();
        assert_eq!(grid.generation(), 1);
        assert_eq!(grid.alive_count(), 0);
        assert!(grid.cells().iter().all(|c| !c.is_alive()));
    }
}
