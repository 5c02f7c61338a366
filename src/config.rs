//! TOML-backed simulation settings.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::application::Strategy;
use crate::error::{LifeError, Result};

/// Upper bound on grids in one pool
pub const MAX_POOL_SIZE: usize = 1000;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct GridConfig {
    /// Horizontal extent
    pub length: usize,
    /// Vertical extent
    pub width: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PoolConfig {
    pub total_count: usize,
    pub displayed_count: usize,
    pub strategy: Strategy,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Character columns available to lay displayed grids side by side
    pub line_width: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Generations per second when paced
    pub updates_per_second: f32,
    pub grid: GridConfig,
    pub pool: PoolConfig,
    pub display: DisplayConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { length: 40, width: 20 }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            total_count: 100,
            displayed_count: 6,
            strategy: Strategy::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { line_width: 160 }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            updates_per_second: 10.0,
            grid: GridConfig::default(),
            pool: PoolConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 || self.width == 0 {
            return Err(LifeError::InvalidDimension {
                length: self.length,
                width: self.width,
            });
        }
        Ok(())
    }
}

impl PoolConfig {
    /// Total must be in `1..=MAX_POOL_SIZE`, displayed in `1..=total`
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_POOL_SIZE).contains(&self.total_count) {
            return Err(LifeError::configuration(format!(
                "total_count {} outside 1..={MAX_POOL_SIZE}",
                self.total_count
            )));
        }
        if !(1..=self.total_count).contains(&self.displayed_count) {
            return Err(LifeError::configuration(format!(
                "displayed_count {} outside 1..={}",
                self.displayed_count, self.total_count
            )));
        }
        Ok(())
    }
}

impl SimConfig {
    /// Read and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`SimConfig::load`], but a missing file yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.pool.validate()?;
        if !(self.updates_per_second.is_finite() && self.updates_per_second > 0.0) {
            return Err(LifeError::configuration("updates_per_second must be positive"));
        }
        Ok(())
    }
}
