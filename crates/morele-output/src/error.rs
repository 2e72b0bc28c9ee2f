//! Error types for output generation.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// The table does not carry the Morele columns in order.
    #[error("output columns do not match the Morele schema: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Failed to create the output directory or file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Polars failed to serialize the table.
    #[error("failed to serialize CSV: {message}")]
    Csv { message: String },

    /// Rendered CSV was not valid UTF-8.
    #[error("rendered CSV is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Csv {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
