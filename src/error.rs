//! Error types for the competitive-learning quantizer.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for quantizer operations.
#[derive(Error, Debug)]
pub enum QuantizerError {
    /// A precondition on neuron count, dimensionality, ranges, rates or the
    /// region catalog does not hold.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A vector does not have the dimensionality of the neuron set.
    #[error("Dimension mismatch: expected {expected} components, got {actual}")]
    DimensionMismatch {
        /// Dimensionality of the neuron set.
        expected: usize,
        /// Length of the offending vector.
        actual: usize,
    },

    /// Neuron index out of bounds.
    #[error("Index out of bounds: {index} >= {max}")]
    IndexOutOfBounds {
        /// The index that was out of bounds.
        index: usize,
        /// The number of neurons.
        max: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot image could not be written.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Result type alias for quantizer operations.
pub type Result<T> = std::result::Result<T, QuantizerError>;

impl QuantizerError {
    /// Shorthand for [`QuantizerError::InvalidConfiguration`].
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        QuantizerError::InvalidConfiguration(msg.into())
    }

    /// Returns an error when `actual` differs from `expected`.
    pub(crate) fn check_dimension(expected: usize, actual: usize) -> Result<()> {
        if expected != actual {
            return Err(QuantizerError::DimensionMismatch { expected, actual });
        }
        Ok(())
    }
}
