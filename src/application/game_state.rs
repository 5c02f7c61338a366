use rand::Rng;

use crate::config::SimConfig;
use crate::domain::{Grid, RuleEngine, Seed, seed_random};
use crate::error::Result;

/// GameState drives a single game field.
/// Seeding, pacing and play/pause live here; the rules live in the engine.
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    engine: RuleEngine,
    /// Open, lethal edges instead of a torus; switched on by glider guns
    pub disable_wrap: bool,
    pub is_running: bool,
    pub update_timer: f32,
    pub updates_per_second: f32,
    pub last_evolution_time_ms: f32,
}

impl GameState {
    /// Create new game state with given grid dimensions
    pub fn new(length: usize, width: usize) -> Result<Self> {
        Ok(Self {
            grid: Grid::new(length, width)?,
            engine: RuleEngine::new(),
            disable_wrap: false,
            is_running: false,
            update_timer: 0.0,
            updates_per_second: 10.0,
            last_evolution_time_ms: 0.0,
        })
    }

    pub fn from_config(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let mut state = Self::new(config.grid.length, config.grid.width)?;
        state.updates_per_second = config.updates_per_second;
        Ok(state)
    }

    /// Replace the grid with an empty one of a new size
    pub fn resize_grid(&mut self, length: usize, width: usize) -> Result<()> {
        self.grid = Grid::new(length, width)?;
        self.disable_wrap = false;
        self.is_running = false;
        Ok(())
    }

    /// Swap in a grid rebuilt elsewhere (e.g. loaded from disk)
    pub fn load_grid(&mut self, grid: Grid) {
        self.grid = grid;
        self.grid.count_alive();
        self.is_running = false;
    }

    /// Apply a seeding request; glider guns switch the field to open edges
    pub fn seed<R: Rng + ?Sized>(&mut self, seed: &Seed, rng: &mut R) -> Result<()> {
        seed.apply(&mut self.grid, rng)?;
        if let Seed::Pattern { kind, .. } = seed {
            if kind.requires_open_boundary() {
                tracing::info!("{} placed, switching to open boundary", kind);
                self.disable_wrap = true;
            }
        }
        Ok(())
    }

    /// Set running state (builder pattern)
    pub fn with_running(mut self, running: bool) -> Self {
        self.is_running = running;
        self
    }

    /// Toggle play/pause state
    pub fn toggle_running(mut self) -> Self {
        self.is_running = !self.is_running;
        self
    }

    /// Clear grid and reset generation counter
    pub fn clear(mut self) -> Self {
        self.grid.clear();
        self.disable_wrap = false;
        self.is_running = false;
        self
    }

    /// Clear, then random-seed the grid
    pub fn randomize(mut self) -> Self {
        self.grid.clear();
        seed_random(&mut self.grid, &mut rand::rng());
        self.disable_wrap = false;
        self.is_running = false;
        self
    }

    /// Adjust simulation speed
    pub fn adjust_speed(mut self, delta: f32) -> Self {
        self.updates_per_second = (self.updates_per_second + delta).clamp(1.0, 60.0);
        self
    }

    /// Advance exactly one generation, returning the new alive count
    pub fn step_once(&mut self) -> usize {
        let start = std::time::Instant::now();
        let alive = self.engine.advance(&mut self.grid, self.disable_wrap);
        self.last_evolution_time_ms = start.elapsed().as_secs_f32() * 1000.0;
        alive
    }

    /// Update simulation by one frame of `delta_time` seconds.
    /// Stops on its own once the field has died out.
    pub fn tick(mut self, delta_time: f32) -> Self {
        if !self.is_running {
            return self;
        }

        self.update_timer += delta_time;
        let update_interval = 1.0 / self.updates_per_second;

        if self.update_timer >= update_interval {
            if self.step_once() == 0 {
                tracing::info!("Field died out at generation {}", self.grid.generation());
                self.is_running = false;
            }
            self.update_timer = 0.0;
        }

        self
    }

    pub fn generation(&self) -> u64 {
        self.grid.generation()
    }
}
