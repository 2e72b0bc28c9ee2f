//! Error types for the Morele model crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or parsing mapping configuration.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to read or write a configuration file.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file extension is neither `.toml` nor `.json`.
    #[error("unsupported configuration format for {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// TOML configuration could not be parsed.
    #[error("invalid TOML in {path}: {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// JSON configuration could not be parsed.
    #[error("invalid JSON in {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration could not be rendered as TOML.
    #[error("failed to render TOML: {0}")]
    TomlRender(#[from] toml::ser::Error),

    /// Configuration could not be rendered as JSON.
    #[error("failed to render JSON: {0}")]
    JsonRender(#[from] serde_json::Error),

    /// A `FIELD=VALUE` assignment was malformed.
    #[error("invalid assignment '{raw}': expected FIELD=VALUE")]
    InvalidAssignment { raw: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
