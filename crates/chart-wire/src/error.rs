// File: crates/chart-wire/src/error.rs
// Summary: Fatal decode failures; a failed decode yields no dataset at all.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("buffer truncated")]
    Truncated(#[from] std::io::Error),
    #[error("string of {len} bytes at offset {offset} runs past the buffer")]
    StringOverrun { offset: usize, len: usize },
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("unknown field type tag {tag} at offset {offset}")]
    UnknownFieldType { tag: u8, offset: usize },
    #[error("record {record} overruns its declared length")]
    RecordOverrun { record: usize },
    #[error("record {record} has no numeric field for dimension '{axis}'")]
    MissingDimension { record: usize, axis: String },
    #[error("record {record} carries a string for dimension '{axis}'")]
    NonNumericDimension { record: usize, axis: String },
    #[error("{0} trailing bytes after the last record")]
    TrailingBytes(usize),
    #[error(transparent)]
    Dataset(#[from] chart_core::ChartError),
}
