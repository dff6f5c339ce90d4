//! Error types for bakery-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from building or overriding a scaffold context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Underlying I/O failure while reading an override file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on an override file — includes file path and line
    /// context from serde_yaml.
    #[error("failed to parse context overrides at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An override named a key the context does not define.
    #[error("unknown context key '{key}'")]
    UnknownKey { key: String },

    /// A toggle override carried something other than `"y"` or `"n"`.
    #[error("invalid flag value '{value}' for '{key}' (expected \"y\" or \"n\")")]
    InvalidFlag { key: String, value: String },
}
