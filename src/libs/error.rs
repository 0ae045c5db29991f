//! Error type shared by the alignment library.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlignError {
    /// Grid access outside its declared dimensions
    #[error("grid index ({row}, {col}) is out of range: nrows={nrows}, ncols={ncols}")]
    OutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    /// Sequence position past the last residue
    #[error("position {pos} is out of range for a sequence of length {len}")]
    PositionOutOfRange { pos: usize, len: usize },

    /// Residue pair absent from the substitution matrix
    #[error("substitution matrix has no score for pair ({a}, {b})")]
    MissingPair { a: char, b: char },

    /// The two rows of an alignment differ in length
    #[error("aligned rows differ in length: {top} vs {bottom}")]
    LengthMismatch { top: usize, bottom: usize },

    /// A traceback pointer led somewhere other than the origin
    #[error("traceback failed at ({row}, {col}): {message}")]
    Traceback {
        row: usize,
        col: usize,
        message: String,
    },

    /// The rescored alignment does not reproduce the DP optimum
    #[error("alignment rescores to {rescored}, but the DP optimum is {optimum}")]
    ScoreDisagreement { optimum: f64, rescored: f64 },

    /// Malformed substitution matrix input
    #[error("malformed substitution matrix: {0}")]
    MatrixFormat(String),

    /// Paired sequence collections of different sizes
    #[error("sequence collections differ in size: {left} vs {right}")]
    BatchSize { left: usize, right: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AlignError>;
