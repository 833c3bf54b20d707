use thiserror::Error;

use crate::network::Phase;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Rejected at construction: zero features, non-positive or non-finite rate.
    #[error("Invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),

    #[error("Shape mismatch for {what}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A training step was called in the wrong order.
    #[error("`{operation}` is not allowed while the network is {phase}")]
    OutOfOrder {
        operation: &'static str,
        phase: Phase,
    },

    #[error("No {0} has been computed yet")]
    NotYetComputed(&'static str),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
