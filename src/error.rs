//! Error types for u-assign.

use thiserror::Error;

/// Result type alias for u-assign operations.
pub type Result<T> = std::result::Result<T, AssignError>;

/// Errors raised when inputs or configuration violate a precondition.
///
/// None of these are transient: they indicate a usage error and are
/// reported to the caller as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignError {
    /// The cost matrix has no rows.
    #[error("cost matrix is empty")]
    EmptyMatrix,

    /// A row length differs from the number of rows.
    #[error("cost matrix is not square: row {row} has {found} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A flat cost buffer does not hold `size * size` entries.
    #[error("expected {expected} costs for a {size}x{size} matrix, got {found}")]
    WrongLength {
        size: usize,
        expected: usize,
        found: usize,
    },

    /// Fewer than two tasks, so no swap neighbor exists.
    #[error("assignment size must be at least 2, got {size}")]
    TooSmall { size: usize },

    /// A cost is NaN or infinite.
    #[error("cost at task {task}, worker {worker} is not finite")]
    NonFiniteCost { task: usize, worker: usize },

    /// Annealing configuration out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A sequence is not a permutation of `0..n`.
    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),
}
