//! How a pool tick spreads its per-grid work.

use serde::{Deserialize, Serialize};

/// Execution strategy for the per-grid evaluate + apply pass.
/// Pool bookkeeping is always applied on the calling thread afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// One engine, grids in pool order
    Serial,
    /// Grids spread over the rayon pool, one engine per worker
    #[default]
    Parallel,
}

impl Strategy {
    pub fn all() -> Vec<Strategy> {
        vec![Strategy::Serial, Strategy::Parallel]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Serial => "Serial",
            Strategy::Parallel => "Parallel",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Serial => "Single rule engine, grids in order",
            Strategy::Parallel => "Rayon work-stealing over grids, engine per worker",
        }
    }
}
