//! Crate error type.

use thiserror::Error;

/// Errors produced by background fitting and polar resampling.
///
/// Two families: precondition violations (malformed shoeboxes, invalid
/// construction parameters, corrupt pixel data) which indicate a caller bug,
/// and [`Error::NotConverged`], the one statistical failure a caller is
/// expected to handle per region.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The three shoebox arrays do not share one extent.
    #[error(
        "shoebox arrays are not congruent: data {data:?}, mask {mask:?}, background {background:?}"
    )]
    InconsistentShoebox {
        data: (usize, usize, usize),
        mask: (usize, usize, usize),
        background: (usize, usize, usize),
    },

    /// No pixel in the shoebox carries both `VALID` and `BACKGROUND`.
    #[error("shoebox has no usable background pixels")]
    NoBackgroundPixels,

    /// A background-flagged pixel holds a negative intensity.
    #[error("negative intensity {value} in background pixel at flat index {index}")]
    NegativeIntensity { index: usize, value: f64 },

    /// The robust tuning constant must be strictly positive.
    #[error("tuning constant must be positive, got {0}")]
    InvalidTuningConstant(f64),

    /// The iteration cap must be at least one.
    #[error("maximum iteration count must be positive")]
    InvalidMaxIter,

    /// The robust mean fit hit the iteration cap without converging.
    #[error("robust mean fit did not converge within {max_iter} iterations")]
    NotConverged { max_iter: usize },

    /// The supersampling multiplier must be at least one.
    #[error("supersampling multiplier must be at least 1")]
    InvalidMultiplier,

    /// A detector panel reported a zero-area image.
    #[error("image size must be non-zero, got {width}x{height}")]
    EmptyImage { width: usize, height: usize },

    /// A resampling input does not match the grid it is resampled from.
    #[error("image shape {actual:?} does not match expected {expected:?} (rows, columns)")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}
