use std::io;

use thiserror::Error;

/// Errors raised by the loss routines and the matrix operations behind them.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SoftmaxError {
    #[error("shape mismatch in {op}: {left:?} vs {right:?}")]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("expected {expected} labels (one per example), got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },
    #[error("label {label} at example {index} is outside [0, {num_classes})")]
    LabelOutOfRange {
        index: usize,
        label: usize,
        num_classes: usize,
    },
    #[error("batch contains no examples")]
    EmptyBatch,
    #[error("regularization strength must be finite and non-negative, got {0}")]
    InvalidRegularization(f64),
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SoftmaxError>;
