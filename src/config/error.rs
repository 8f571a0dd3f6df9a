use std::path::PathBuf;
use thiserror::Error;

use crate::value::Kind;

/// Errors produced while loading, accessing, or encoding a configuration.
///
/// Accessor failures ([`NotFound`](Self::NotFound) and
/// [`TypeMismatch`](Self::TypeMismatch)) are ordinary recoverable values;
/// callers typically fall back to a default with `unwrap_or_default()`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("no value at '{0}'")]
    NotFound(String),

    #[error("value at '{path}' is {actual}, expected {expected}")]
    TypeMismatch {
        path: String,
        expected: Kind,
        actual: Kind,
    },

    #[error("malformed override '{0}': expected '<path>:<value>'")]
    InvalidOverride(String),

    #[error("required config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
