//! Error types for mapping operations.

use thiserror::Error;

/// Errors from mapping operations.
///
/// Mapping itself is best-effort; the only failure is the dataframe library
/// rejecting the assembled output frame.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to assemble output table: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for MapError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
