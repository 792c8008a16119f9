//! Error type shared by every stage of a clustering run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a run. None of these are retried: the input
/// is a fixed offline table, so a second attempt would fail the same way.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// A hyperparameter or argument was outside its valid range.
    #[error("invalid parameter `{parameter}`: {message}")]
    InvalidParameter { parameter: &'static str, message: String },

    /// The dataset has no samples, or no features.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A row had a different number of features than the first row.
    #[error("row {row} has {found} features, expected {expected}")]
    InconsistentDimension {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A line of an input file had a different number of fields than the
    /// first data line. `line` is 1-based and counts blank lines.
    #[error("line {line} has {found} fields, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A field could not be parsed as a finite number.
    #[error("line {line}, column {column}: cannot parse {value:?} as a finite number")]
    Parse {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("failed to write plot: {0}")]
    Plot(#[from] image::ImageError),

    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(parameter: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            parameter,
            message: message.into(),
        }
    }
}
