//! Error types for terrain construction

/// Errors that can occur while building the terrain
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Quadtree construction needs a square grid of cells that halves cleanly down to one
    #[error("terrain cell count {0} must be a non-zero power of two")]
    InvalidCellCount(usize),

    /// Interpolation needs at least one cell of samples
    #[error("heightfield dimension {0} is below the minimum of 2")]
    HeightfieldTooSmall(usize),

    /// Heightfield data does not match its declared dimension
    #[error("heightfield of dimension {dim} needs {expected} samples, got {actual}")]
    HeightCount {
        dim: usize,
        expected: usize,
        actual: usize,
    },
}

/// Result type for terrain operations
pub type Result<T> = std::result::Result<T, Error>;
