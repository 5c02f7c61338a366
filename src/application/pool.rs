use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::Strategy;
use super::view::{FieldView, Layout, PoolView};
use crate::config::{GridConfig, MAX_POOL_SIZE, PoolConfig};
use crate::domain::{Grid, RuleEngine, Seeder};
use crate::error::{LifeError, Result};

/// Pool runs many independent games side by side and keeps a fixed-size
/// window of them on display, swapping out fields that die.
///
/// All grids share one size. The pool's generation counter is its own;
/// ticking a pool leaves each grid's generation field untouched.
#[derive(Debug)]
pub struct Pool {
    grids: Vec<Grid>,
    displayed: Vec<usize>,
    /// Indices that have hit zero at least once; only `reset_liveness` clears it
    dead: BTreeSet<usize>,
    /// Indices with live cells right now
    alive: BTreeSet<usize>,
    /// Starts at the pool size, drops once per grid the first time it dies
    fields_alive: usize,
    generation: u64,
    strategy: Strategy,
}

/// Everything needed to rebuild a pool, for an external persistence layer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub grids: Vec<Grid>,
    pub displayed: Vec<usize>,
    pub dead: BTreeSet<usize>,
    pub alive: BTreeSet<usize>,
    pub fields_alive: usize,
    pub generation: u64,
}

impl Pool {
    /// Build `pool.total_count` grids of `grid` size and seed each one.
    /// The first `pool.displayed_count` grids start on display.
    pub fn new<S: Seeder + ?Sized>(
        pool: &PoolConfig,
        grid: &GridConfig,
        seeder: &mut S,
    ) -> Result<Self> {
        pool.validate()?;
        grid.validate()?;

        let grids = Self::seeded_grids(pool.total_count, grid, seeder)?;
        let alive = alive_indices(&grids);

        tracing::info!(
            "Pool initialized: {} grids of {}x{}, {} displayed, {} strategy",
            pool.total_count,
            grid.length,
            grid.width,
            pool.displayed_count,
            pool.strategy.name()
        );

        Ok(Self {
            grids,
            displayed: (0..pool.displayed_count).collect(),
            dead: BTreeSet::new(),
            alive,
            fields_alive: pool.total_count,
            generation: 1,
            strategy: pool.strategy,
        })
    }

    /// Single-instance mode: one grid, one display slot
    pub fn single<S: Seeder + ?Sized>(length: usize, width: usize, seeder: &mut S) -> Result<Self> {
        let pool = PoolConfig {
            total_count: 1,
            displayed_count: 1,
            strategy: Strategy::Serial,
        };
        Self::new(&pool, &GridConfig { length, width }, seeder)
    }

    fn seeded_grids<S: Seeder + ?Sized>(
        count: usize,
        grid: &GridConfig,
        seeder: &mut S,
    ) -> Result<Vec<Grid>> {
        (0..count)
            .map(|_| -> Result<Grid> {
                let mut field = Grid::new(grid.length, grid.width)?;
                seeder.seed(&mut field);
                field.count_alive();
                Ok(field)
            })
            .collect()
    }

    /// Rebuild a pool handed back by a persistence layer. Indices, the
    /// alive set and the liveness counters are checked against the grids
    /// before anything is accepted.
    pub fn from_snapshot(snapshot: PoolSnapshot, strategy: Strategy) -> Result<Self> {
        let PoolSnapshot {
            mut grids,
            displayed,
            dead,
            alive,
            fields_alive,
            generation,
        } = snapshot;

        let total = grids.len();
        PoolConfig {
            total_count: total,
            displayed_count: displayed.len(),
            strategy,
        }
        .validate()?;

        let dimensions = grids[0].dimensions();
        if grids.iter().any(|grid| grid.dimensions() != dimensions) {
            return Err(LifeError::configuration("pooled grids differ in size"));
        }

        let unique: BTreeSet<_> = displayed.iter().collect();
        if unique.len() != displayed.len() {
            return Err(LifeError::configuration("duplicate displayed index"));
        }
        let out_of_range = displayed
            .iter()
            .chain(&dead)
            .chain(&alive)
            .find(|&&index| index >= total);
        if let Some(index) = out_of_range {
            return Err(LifeError::configuration(format!(
                "index {index} outside pool of {total}"
            )));
        }
        if generation == 0 {
            return Err(LifeError::configuration("generation must start at 1"));
        }

        grids.iter_mut().for_each(|grid| {
            grid.count_alive();
        });
        if alive != alive_indices(&grids) {
            return Err(LifeError::configuration("alive set disagrees with grid contents"));
        }
        let dead_only = dead.difference(&alive).count();
        if fields_alive + dead_only > total {
            return Err(LifeError::configuration(format!(
                "{fields_alive} alive fields plus {dead_only} dead exceed pool of {total}"
            )));
        }
        tracing::info!("Pool restored at generation {} with {} grids", generation, total);

        Ok(Self {
            grids,
            displayed,
            dead,
            alive,
            fields_alive,
            generation,
            strategy,
        })
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            grids: self.grids.clone(),
            displayed: self.displayed.clone(),
            dead: self.dead.clone(),
            alive: self.alive.clone(),
            fields_alive: self.fields_alive,
            generation: self.generation,
        }
    }

    /// Advance every grid one generation, then update liveness bookkeeping
    pub fn tick(&mut self) {
        match self.strategy {
            Strategy::Serial => {
                let mut engine = RuleEngine::new();
                for grid in &mut self.grids {
                    engine.step(grid, false);
                }
            }
            Strategy::Parallel => {
                self.grids.par_iter_mut().for_each_init(RuleEngine::new, |engine, grid| {
                    engine.step(grid, false);
                });
            }
        }

        let before = self.fields_alive;
        for (index, grid) in self.grids.iter().enumerate() {
            if grid.alive_count() > 0 {
                self.alive.insert(index);
                continue;
            }
            self.alive.remove(&index);
            if self.dead.insert(index) {
                self.fields_alive = self.fields_alive.saturating_sub(1);
            }
        }
        self.generation += 1;

        tracing::debug!(
            "Pool generation {}: {} fields alive, {} cells alive",
            self.generation,
            self.fields_alive,
            self.total_alive_cells()
        );
        if before > 0 && self.fields_alive == 0 {
            tracing::info!("Every field has died out by generation {}", self.generation);
        }
    }

    /// Replace displayed fields that have died with live ones not yet shown.
    ///
    /// Nothing is swapped while fewer fields are alive than there are
    /// display slots; a dead field stays on screen rather than leaving a gap
    /// or showing one grid twice. Returns the number of slots replaced.
    pub fn refresh_display(&mut self) -> usize {
        if self.fields_alive < self.displayed.len() {
            return 0;
        }

        let mut replaced = 0;
        for slot in 0..self.displayed.len() {
            let current = self.displayed[slot];
            if self.grids[current].alive_count() > 0 {
                continue;
            }

            let candidate = self
                .alive
                .iter()
                .copied()
                .find(|index| self.grids[*index].alive_count() > 0 && !self.displayed.contains(index));
            let Some(next) = candidate else {
                break;
            };

            tracing::trace!("Display slot {}: field {} -> {}", slot, current, next);
            self.displayed[slot] = next;
            replaced += 1;
        }
        replaced
    }

    /// One generation as a driver sees it: tick, then heal the display
    pub fn advance(&mut self) {
        self.tick();
        self.refresh_display();
    }

    /// Throw away every grid and start over with fresh seeds
    pub fn restart<S: Seeder + ?Sized>(&mut self, seeder: &mut S) -> Result<()> {
        let (length, width) = self.grids[0].dimensions();
        let total = self.grids.len();

        self.grids = Self::seeded_grids(total, &GridConfig { length, width }, seeder)?;
        self.displayed = (0..self.displayed.len()).collect();
        self.dead.clear();
        self.alive = alive_indices(&self.grids);
        self.fields_alive = total;
        self.generation = 1;

        tracing::info!("Pool restarted with {} grids", total);
        Ok(())
    }

    /// Clear one grid and seed it again. A revived grid rejoins the alive
    /// set but stays recorded as having died.
    pub fn reseed<S: Seeder + ?Sized>(&mut self, index: usize, seeder: &mut S) -> Result<()> {
        let total = self.grids.len();
        let grid = self.grids.get_mut(index).ok_or_else(|| {
            LifeError::configuration(format!("index {index} outside pool of {total}"))
        })?;

        grid.clear();
        seeder.seed(grid);
        if grid.count_alive() > 0 {
            self.alive.insert(index);
        } else {
            self.alive.remove(&index);
        }
        Ok(())
    }

    /// Forget death history and recount liveness from the grids as they are
    pub fn reset_liveness(&mut self) {
        self.dead.clear();
        self.alive = alive_indices(&self.grids);
        self.fields_alive = self.alive.len();
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Sum of live cells across the whole pool, displayed or not
    pub fn total_alive_cells(&self) -> usize {
        self.grids.iter().map(Grid::alive_count).sum()
    }

    pub fn fields_alive(&self) -> usize {
        self.fields_alive
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn total_count(&self) -> usize {
        self.grids.len()
    }

    pub fn displayed_count(&self) -> usize {
        self.displayed.len()
    }

    pub fn displayed_indices(&self) -> &[usize] {
        &self.displayed
    }

    pub fn alive_indices(&self) -> &BTreeSet<usize> {
        &self.alive
    }

    pub fn dead_indices(&self) -> &BTreeSet<usize> {
        &self.dead
    }

    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    pub fn grid(&self, index: usize) -> Option<&Grid> {
        self.grids.get(index)
    }

    /// No grid has a live cell left
    pub fn is_exhausted(&self) -> bool {
        self.alive.is_empty()
    }

    pub fn layout(&self, line_width: usize) -> Layout {
        Layout::compute(self.grids[0].length(), self.displayed.len(), line_width)
    }

    /// View model for a renderer
    pub fn view(&self, line_width: usize) -> PoolView {
        let fields = self
            .displayed
            .iter()
            .map(|&index| {
                let grid = &self.grids[index];
                FieldView {
                    index,
                    alive_count: grid.alive_count(),
                    dead_count: grid.dead_count(),
                    generation: grid.generation(),
                    alive: grid.alive_count() > 0,
                }
            })
            .collect();

        PoolView {
            generation: self.generation,
            total_count: self.grids.len(),
            fields_alive: self.fields_alive,
            total_alive_cells: self.total_alive_cells(),
            layout: self.layout(line_width),
            fields,
        }
    }
}

fn alive_indices(grids: &[Grid]) -> BTreeSet<usize> {
    grids
        .iter()
        .enumerate()
        .filter(|(_, grid)| grid.alive_count() > 0)
        .map(|(index, _)| index)
        .collect()
}
