//! Error types for the percolation core.
//!
//! Every fallible operation on the lattice, the union-find forest or the
//! trial driver returns `Result<T, PercolationError>`. Nothing is clamped
//! or defaulted: an invalid input aborts the operation that received it.

use thiserror::Error;

/// Result type alias for percolation operations.
pub type Result<T> = std::result::Result<T, PercolationError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PercolationError {
    /// A size or count that must be positive was not.
    #[error("invalid argument: {name} must be positive (got {value})")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        value: i64,
    },

    /// A 1-indexed lattice coordinate outside `[1, n]`.
    #[error("invalid coordinate ({row}, {col}): must lie in [1, {n}]")]
    InvalidCoordinate { row: i64, col: i64, n: usize },

    /// A union-find element outside `[0, len)`.
    #[error("index {index} out of range for {len} elements")]
    IndexOutOfRange { index: usize, len: usize },
}
