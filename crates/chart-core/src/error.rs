// File: crates/chart-core/src/error.rs
// Summary: Error type for caller contract violations (bad axis names, bad configuration).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("unknown axis '{0}'")]
    UnknownAxis(String),
    #[error("axis '{0}' declared more than once")]
    DuplicateAxis(String),
    #[error("axis '{0}' used more than once in a triple")]
    RepeatedTripleAxis(String),
    #[error("dimension list is empty")]
    EmptyDimensions,
    #[error("expected exactly one time axis, found {0}")]
    TimeAxisCount(usize),
    #[error("point {index} has {got} values, expected {expected}")]
    ArityMismatch { index: usize, expected: usize, got: usize },
    #[error("axis '{0}' is plotted and cannot carry a filter")]
    FilterOnPlottedAxis(String),
    #[error("compression must be at least 1")]
    ZeroCompress,
    #[error("unknown aggregation '{0}'")]
    UnknownAggregation(String),
    #[error("unknown filter mode '{0}'")]
    UnknownFilterMode(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
