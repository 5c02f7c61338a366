//! Error types for the simulation core.

use thiserror::Error;

/// Errors surfaced by grid construction, pool construction and seeding.
#[derive(Error, Debug)]
pub enum LifeError {
    /// Grid requested with a zero extent
    #[error("Invalid grid dimension: {length}x{width}")]
    InvalidDimension { length: usize, width: usize },

    /// Pool or display sizes outside the supported range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Coordinate outside `[0, length) x [0, width)`
    #[error("Coordinate ({x}, {y}) out of range for {length}x{width} grid")]
    CoordinateOutOfRange {
        x: usize,
        y: usize,
        length: usize,
        width: usize,
    },

    /// Pattern selection token that names no known pattern
    #[error("Unknown pattern: {0}")]
    UnknownPattern(String),

    /// Config file could not be read
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for `SimConfig`
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, LifeError>;

impl LifeError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
