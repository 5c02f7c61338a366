//! Library of classic Game of Life patterns.
//!
//! Each pattern is a literal table of `(dx, dy)` offsets of its live cells,
//! `dx` growing to the right and `dy` growing downwards. Stamping writes
//! only those cells; everything else on the grid is left as it was.

use std::fmt;
use std::str::FromStr;

use super::{Cell, Grid};
use crate::error::{LifeError, Result};

const GLIDER: &[(usize, usize)] = &[
    (1, 0),
    (2, 1),
    (0, 2), (1, 2), (2, 2),
];

const LIGHTWEIGHT_SPACESHIP: &[(usize, usize)] = &[
    (1, 0), (4, 0),
    (0, 1),
    (0, 2), (4, 2),
    (0, 3), (1, 3), (2, 3), (3, 3),
];

const MIDDLEWEIGHT_SPACESHIP: &[(usize, usize)] = &[
    (3, 0),
    (1, 1), (5, 1),
    (0, 2),
    (0, 3), (5, 3),
    (0, 4), (1, 4), (2, 4), (3, 4), (4, 4),
];

const HEAVYWEIGHT_SPACESHIP: &[(usize, usize)] = &[
    (3, 0), (4, 0),
    (1, 1), (6, 1),
    (0, 2),
    (0, 3), (6, 3),
    (0, 4), (1, 4), (2, 4), (3, 4), (4, 4), (5, 4),
];

const GOSPER_GLIDER_GUN: &[(usize, usize)] = &[
    (24, 0),
    (22, 1), (24, 1),
    (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
    (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
    (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
    (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
    (10, 6), (16, 6), (24, 6),
    (11, 7), (15, 7),
    (12, 8), (13, 8),
];

const SIMKIN_GLIDER_GUN: &[(usize, usize)] = &[
    // Two blocks and the block below them
    (0, 0), (1, 0), (7, 0), (8, 0),
    (0, 1), (1, 1), (7, 1), (8, 1),
    (4, 3), (5, 3),
    (4, 4), (5, 4),
    // Reaction core
    (22, 9), (23, 9), (25, 9), (26, 9),
    (21, 10), (27, 10),
    (21, 11), (28, 11), (31, 11), (32, 11),
    (21, 12), (22, 12), (23, 12), (27, 12), (31, 12), (32, 12),
    (26, 13),
    // Eater
    (20, 17), (21, 17),
    (20, 18),
    (21, 19), (22, 19), (23, 19),
    (23, 20),
];

const BLOCK: &[(usize, usize)] = &[
    (0, 0), (1, 0),
    (0, 1), (1, 1),
];

const BLINKER: &[(usize, usize)] = &[(0, 1), (1, 1), (2, 1)];

const TOAD: &[(usize, usize)] = &[
    (1, 0), (2, 0), (3, 0),
    (0, 1), (1, 1), (2, 1),
];

const BEACON: &[(usize, usize)] = &[
    (0, 0), (1, 0),
    (0, 1),
    (3, 2),
    (2, 3), (3, 3),
];

const PULSAR: &[(usize, usize)] = &[
    (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
    (0, 2), (5, 2), (7, 2), (12, 2),
    (0, 3), (5, 3), (7, 3), (12, 3),
    (0, 4), (5, 4), (7, 4), (12, 4),
    (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
    (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
    (0, 8), (5, 8), (7, 8), (12, 8),
    (0, 9), (5, 9), (7, 9), (12, 9),
    (0, 10), (5, 10), (7, 10), (12, 10),
    (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
];

const R_PENTOMINO: &[(usize, usize)] = &[
    (1, 0), (2, 0),
    (0, 1), (1, 1),
    (1, 2),
];

const ACORN: &[(usize, usize)] = &[
    (1, 0),
    (3, 1),
    (0, 2), (1, 2), (4, 2), (5, 2), (6, 2),
];

/// Every pattern the library can stamp
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Glider,
    LightweightSpaceship,
    MiddleweightSpaceship,
    HeavyweightSpaceship,
    GosperGliderGun,
    SimkinGliderGun,
    Block,
    Blinker,
    Toad,
    Beacon,
    Pulsar,
    RPentomino,
    Acorn,
}

impl PatternKind {
    /// Get all available patterns
    pub fn all() -> Vec<PatternKind> {
        vec![
            PatternKind::Glider,
            PatternKind::LightweightSpaceship,
            PatternKind::MiddleweightSpaceship,
            PatternKind::HeavyweightSpaceship,
            PatternKind::GosperGliderGun,
            PatternKind::SimkinGliderGun,
            PatternKind::Block,
            PatternKind::Blinker,
            PatternKind::Toad,
            PatternKind::Beacon,
            PatternKind::Pulsar,
            PatternKind::RPentomino,
            PatternKind::Acorn,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Glider => "Glider",
            PatternKind::LightweightSpaceship => "LWSS",
            PatternKind::MiddleweightSpaceship => "MWSS",
            PatternKind::HeavyweightSpaceship => "HWSS",
            PatternKind::GosperGliderGun => "Gosper Glider Gun",
            PatternKind::SimkinGliderGun => "Simkin Glider Gun",
            PatternKind::Block => "Block",
            PatternKind::Blinker => "Blinker",
            PatternKind::Toad => "Toad",
            PatternKind::Beacon => "Beacon",
            PatternKind::Pulsar => "Pulsar",
            PatternKind::RPentomino => "R-pentomino",
            PatternKind::Acorn => "Acorn",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PatternKind::Glider => "Moves diagonally (period 4)",
            PatternKind::LightweightSpaceship => "Lightweight Spaceship (period 4)",
            PatternKind::MiddleweightSpaceship => "Middleweight Spaceship (period 4)",
            PatternKind::HeavyweightSpaceship => "Heavyweight Spaceship (period 4)",
            PatternKind::GosperGliderGun => "Produces gliders (period 30)",
            PatternKind::SimkinGliderGun => "Produces gliders (period 120)",
            PatternKind::Block => "Still life",
            PatternKind::Blinker => "Oscillator (period 2)",
            PatternKind::Toad => "Oscillator (period 2)",
            PatternKind::Beacon => "Oscillator (period 2)",
            PatternKind::Pulsar => "Oscillator (period 3)",
            PatternKind::RPentomino => "Methuselah - stabilizes at gen 1103",
            PatternKind::Acorn => "Methuselah - stabilizes at gen 5206",
        }
    }

    /// Relative coordinates of alive cells
    pub fn cells(self) -> &'static [(usize, usize)] {
        match self {
            PatternKind::Glider => GLIDER,
            PatternKind::LightweightSpaceship => LIGHTWEIGHT_SPACESHIP,
            PatternKind::MiddleweightSpaceship => MIDDLEWEIGHT_SPACESHIP,
            PatternKind::HeavyweightSpaceship => HEAVYWEIGHT_SPACESHIP,
            PatternKind::GosperGliderGun => GOSPER_GLIDER_GUN,
            PatternKind::SimkinGliderGun => SIMKIN_GLIDER_GUN,
            PatternKind::Block => BLOCK,
            PatternKind::Blinker => BLINKER,
            PatternKind::Toad => TOAD,
            PatternKind::Beacon => BEACON,
            PatternKind::Pulsar => PULSAR,
            PatternKind::RPentomino => R_PENTOMINO,
            PatternKind::Acorn => ACORN,
        }
    }

    /// Bounding box as (columns, rows)
    pub fn extent(self) -> (usize, usize) {
        let cells = self.cells();
        let width = cells.iter().map(|(x, _)| *x).max().unwrap_or(0) + 1;
        let height = cells.iter().map(|(_, y)| *y).max().unwrap_or(0) + 1;
        (width, height)
    }

    /// Glider guns need an open boundary: on a torus their own output
    /// stream wraps back round and wrecks the gun.
    pub fn requires_open_boundary(self) -> bool {
        matches!(self, PatternKind::GosperGliderGun | PatternKind::SimkinGliderGun)
    }

    /// Stamp this pattern onto `grid` with its top-left corner at (x, y)
    pub fn stamp(self, grid: &mut Grid, x: usize, y: usize) -> Result<()> {
        stamp(grid, self, x, y)
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternKind {
    type Err = LifeError;

    fn from_str(token: &str) -> Result<Self> {
        let kind = match token.trim().to_ascii_lowercase().as_str() {
            "glider" => PatternKind::Glider,
            "lwss" | "light" | "lightweight" => PatternKind::LightweightSpaceship,
            "mwss" | "middle" | "middleweight" => PatternKind::MiddleweightSpaceship,
            "hwss" | "heavy" | "heavyweight" => PatternKind::HeavyweightSpaceship,
            "gosper" | "gun" | "gosper-gun" => PatternKind::GosperGliderGun,
            "simkin" | "simkin-gun" => PatternKind::SimkinGliderGun,
            "block" => PatternKind::Block,
            "blinker" => PatternKind::Blinker,
            "toad" => PatternKind::Toad,
            "beacon" => PatternKind::Beacon,
            "pulsar" => PatternKind::Pulsar,
            "r-pentomino" | "rpentomino" => PatternKind::RPentomino,
            "acorn" => PatternKind::Acorn,
            _ => return Err(LifeError::UnknownPattern(token.to_string())),
        };
        Ok(kind)
    }
}

/// Set every live cell of `kind` with the pattern anchored at (x, y).
///
/// The anchor must lie on the grid. Offsets from it wrap on both axes, so a
/// pattern larger than the grid folds back onto itself. The alive count is
/// refreshed afterwards.
pub fn stamp(grid: &mut Grid, kind: PatternKind, x: usize, y: usize) -> Result<()> {
    let (length, width) = grid.dimensions();
    if x >= length || y >= width {
        return Err(LifeError::CoordinateOutOfRange { x, y, length, width });
    }

    for &(dx, dy) in kind.cells() {
        grid.set_wrapped(x + dx, y + dy, Cell::Alive);
    }
    grid.count_alive();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RuleEngine;
    use std::collections::HashSet;

    fn alive_set(grid: &Grid) -> HashSet<(usize, usize)> {
        grid.iter_cells()
            .filter(|(_, _, cell)| cell.is_alive())
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    fn shifted(kind: PatternKind, x: usize, y: usize) -> HashSet<(usize, usize)> {
        kind.cells().iter().map(|&(dx, dy)| (x + dx, y + dy)).collect()
    }

    #[test]
    fn test_cell_counts() {
        let expected = [
            (PatternKind::Glider, 5),
            (PatternKind::LightweightSpaceship, 9),
            (PatternKind::MiddleweightSpaceship, 11),
            (PatternKind::HeavyweightSpaceship, 13),
            (PatternKind::GosperGliderGun, 36),
            (PatternKind::SimkinGliderGun, 36),
            (PatternKind::Pulsar, 48),
        ];
        for (kind, count) in expected {
            assert_eq!(kind.cells().len(), count, "{kind}");
        }
    }

    #[test]
    fn test_no_duplicate_offsets() {
        for kind in PatternKind::all() {
            let unique: HashSet<_> = kind.cells().iter().collect();
            assert_eq!(unique.len(), kind.cells().len(), "{kind}");
        }
    }

    #[test]
    fn test_extents() {
        assert_eq!(PatternKind::Glider.extent(), (3, 3));
        assert_eq!(PatternKind::GosperGliderGun.extent(), (36, 9));
        assert_eq!(PatternKind::SimkinGliderGun.extent(), (33, 21));
        assert_eq!(PatternKind::HeavyweightSpaceship.extent(), (7, 5));
    }

    #[test]
    fn test_stamp_places_pattern_at_anchor() {
        let mut grid = Grid::new(20, 20).unwrap();
        PatternKind::Glider.stamp(&mut grid, 4, 6).unwrap();

        assert_eq!(alive_set(&grid), shifted(PatternKind::Glider, 4, 6));
        assert_eq!(grid.alive_count(), 5);
    }

    #[test]
    fn test_stamp_keeps_existing_cells() {
        let mut grid = Grid::new(20, 20).unwrap();
        grid.set(0, 0, Cell::Alive).unwrap();
        stamp(&mut grid, PatternKind::Block, 10, 10).unwrap();

        assert_eq!(grid.get(0, 0), Some(Cell::Alive));
        assert_eq!(grid.alive_count(), 5);
    }

    #[test]
    fn test_stamp_wraps_on_small_grid() {
        let mut grid = Grid::new(5, 5).unwrap();
        stamp(&mut grid, PatternKind::Glider, 4, 4).unwrap();

        // (4+1, 4) -> (0, 4), (4+2, 4+2) -> (1, 1)
        assert_eq!(grid.get(0, 4), Some(Cell::Alive));
        assert_eq!(grid.get(1, 1), Some(Cell::Alive));
        assert_eq!(grid.alive_count(), 5);
    }

    #[test]
    fn test_oversized_pattern_folds_onto_itself() {
        let mut grid = Grid::new(4, 4).unwrap();
        stamp(&mut grid, PatternKind::GosperGliderGun, 0, 0).unwrap();
        assert!(grid.alive_count() > 0);
        assert!(grid.alive_count() < 36);
    }

    #[test]
    fn test_anchor_out_of_range_rejected() {
        let mut grid = Grid::new(10, 10).unwrap();
        let err = stamp(&mut grid, PatternKind::Glider, 10, 3).unwrap_err();
        assert!(matches!(err, LifeError::CoordinateOutOfRange { x: 10, y: 3, .. }));
        assert_eq!(grid.count_alive(), 0);
    }

    #[test]
    fn test_spaceships_travel_left() {
        let mut engine = RuleEngine::new();
        for kind in [
            PatternKind::LightweightSpaceship,
            PatternKind::MiddleweightSpaceship,
            PatternKind::HeavyweightSpaceship,
        ] {
            let mut grid = Grid::new(30, 20).unwrap();
            kind.stamp(&mut grid, 10, 5).unwrap();
            for _ in 0..4 {
                engine.step(&mut grid, false);
            }
            assert_eq!(alive_set(&grid), shifted(kind, 8, 5), "{kind}");
        }
    }

    #[test]
    fn test_gosper_gun_period_and_output() {
        let mut grid = Grid::new(40, 20).unwrap();
        PatternKind::GosperGliderGun.stamp(&mut grid, 0, 0).unwrap();
        let gun = shifted(PatternKind::GosperGliderGun, 0, 0);

        let mut engine = RuleEngine::new();
        for _ in 0..30 {
            engine.step(&mut grid, true);
        }

        // Gun restored, plus one emitted glider
        assert!(gun.is_subset(&alive_set(&grid)));
        assert_eq!(grid.alive_count(), 41);
    }

    #[test]
    fn test_simkin_gun_period_and_output() {
        let mut grid = Grid::new(60, 60).unwrap();
        PatternKind::SimkinGliderGun.stamp(&mut grid, 5, 5).unwrap();
        let gun = shifted(PatternKind::SimkinGliderGun, 5, 5);

        let mut engine = RuleEngine::new();
        for _ in 0..120 {
            engine.step(&mut grid, true);
        }

        assert!(gun.is_subset(&alive_set(&grid)));
        assert_eq!(grid.alive_count(), 41);
    }

    #[test]
    fn test_only_guns_require_open_boundary() {
        let open: Vec<_> = PatternKind::all()
            .into_iter()
            .filter(|kind| kind.requires_open_boundary())
            .collect();
        assert_eq!(open, vec![PatternKind::GosperGliderGun, PatternKind::SimkinGliderGun]);
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!("glider".parse::<PatternKind>().unwrap(), PatternKind::Glider);
        assert_eq!(" HWSS ".parse::<PatternKind>().unwrap(), PatternKind::HeavyweightSpaceship);
        assert_eq!("gun".parse::<PatternKind>().unwrap(), PatternKind::GosperGliderGun);
        assert!(matches!(
            "spaceship".parse::<PatternKind>(),
            Err(LifeError::UnknownPattern(_))
        ));
    }

    #[test]
    fn test_names_are_unique() {
        let names: Vec<_> = PatternKind::all().iter().map(|k| k.name()).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len());
    }
}
