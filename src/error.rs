//! Error types for terrain generation.

/// Errors that can occur while validating parameters or running the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// Width or height below 1, or a size whose buffers would overflow.
    /// Rejected before any grid is allocated.
    #[error("invalid map dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// A region table needs at least one band.
    #[error("region table is empty")]
    EmptyRegionTable,

    /// Thresholds and colours must pair up one-to-one.
    #[error("region table has {thresholds} thresholds but {colours} colours")]
    MismatchedRegions { thresholds: usize, colours: usize },

    /// Region thresholds must be non-decreasing.
    #[error("region threshold {index} is lower than the one before it")]
    UnorderedThresholds { index: usize },

    /// The top band must be a catch-all.
    #[error("last region threshold must be exactly 1.0, found {0}")]
    LastThresholdNotOne(f32),

    /// Mesh indices are 32-bit, so every vertex index must fit a `u32`.
    #[error("{width}x{height} grid has too many vertices for a 32-bit index buffer")]
    MeshTooLarge { width: usize, height: usize },

    /// A height curve needs at least one key.
    #[error("height curve has no keys")]
    EmptyCurve,

    /// Failed to parse or serialize a parameter file.
    #[error("failed to parse parameters: {0}")]
    Config(#[from] serde_json::Error),

    /// Failed to read a parameter file from disk.
    #[error("failed to read parameters: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
