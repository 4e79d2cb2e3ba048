//! Error types for terrain construction.

use thiserror::Error;

/// Configuration errors rejected when a terrain instance is built.
///
/// Per-frame updates never fail; only construction does.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TerrainError {
    /// Patch must have at least one step per axis.
    #[error("terrain subdivisions must be at least 1, got {0}")]
    InvalidSubdivisions(u32),

    /// Step stride must advance at least one field sample.
    #[error("terrain step stride must be at least 1, got {0}")]
    InvalidStep(u32),

    /// Height field has a zero dimension.
    #[error("height field is empty ({columns} columns x {rows} rows)")]
    EmptyField {
        /// Column count
        columns: usize,
        /// Row count
        rows: usize,
    },

    /// `columns * rows` triples would not fit in memory.
    #[error("height field of {columns} columns x {rows} rows is too large")]
    FieldTooLarge {
        /// Column count
        columns: usize,
        /// Row count
        rows: usize,
    },

    /// Sample buffer does not hold `columns * rows` triples.
    #[error("height field needs {expected} floats, got {actual}")]
    SampleCountMismatch {
        /// Required buffer length
        expected: usize,
        /// Supplied buffer length
        actual: usize,
    },

    /// Vertex grid would not fit 32-bit mesh indices.
    #[error("{subdivisions} subdivisions exceed the 32-bit index range")]
    TooManyVertices {
        /// Requested subdivisions
        subdivisions: u32,
    },
}
