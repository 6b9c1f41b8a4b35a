//! Error type shared by every layer of the crate.

use thiserror::Error;

pub type NnResult<T> = std::result::Result<T, NnError>;

#[derive(Debug, Error)]
pub enum NnError {
    /// Operand shapes disagree. Vectors are reported as `(len, 1)`.
    #[error("shape mismatch in {op}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        op: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// The checkpoint body does not have the size its file name promises.
    #[error("corrupt checkpoint '{path}': topology {topology} needs {expected} bytes, found {found}")]
    CorruptCheckpoint {
        path: String,
        topology: String,
        expected: usize,
        found: usize,
    },

    #[error("failed to allocate a buffer of {elements} elements")]
    AllocationFailure { elements: usize },

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("invalid checkpoint name: {0}")]
    InvalidCheckpointName(String),

    #[error("invalid training configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NnError {
    pub(crate) fn shape(op: &'static str, expected: (usize, usize), found: (usize, usize)) -> NnError {
        NnError::ShapeMismatch { op, expected, found }
    }
}
