//! Error types for bakery-validator.
//!
//! Each variant is one anomaly class: a failed bake precondition, an
//! unresolved template expression, or a toggle-state mismatch. Every variant
//! that concerns a file carries its path — a validation failure that cannot
//! name the offending path is useless in a test report.

use std::path::PathBuf;

use thiserror::Error;

/// All anomalies a generated project tree can exhibit.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The bake itself failed; no tree checks were attempted.
    #[error("bake failed with exit code {exit_code}: {message}")]
    BakeFailed { exit_code: i32, message: String },

    /// The bake claimed success but produced no project directory.
    #[error("bake reported success but produced no project directory")]
    MissingProjectDir,

    /// A successful bake must produce at least one file.
    #[error("no files generated under {root}")]
    EmptyTree { root: PathBuf },

    /// A `{{ scaffold.* }}` expression survived rendering.
    #[error("template variable not replaced in {path} (line {line}): {snippet}")]
    UnresolvedPlaceholder {
        path: PathBuf,
        line: usize,
        snippet: String,
    },

    /// The password sentinel survived the post-bake hook.
    #[error("password placeholder not replaced in {path}")]
    UnresolvedSecret { path: PathBuf },

    /// A file gated on an enabled toggle is empty or missing content.
    #[error("expected {path} to be non-empty")]
    ExpectedNonEmpty { path: PathBuf },

    /// A file gated on a disabled toggle still carries content.
    #[error("expected {path} to be empty, found {len} bytes")]
    ExpectedEmpty { path: PathBuf, len: u64 },

    /// A directory gated on an enabled toggle is missing.
    #[error("expected directory {path} to exist")]
    MissingDirectory { path: PathBuf },

    /// A directory gated on a disabled toggle is still present.
    #[error("expected directory {path} to be absent")]
    UnexpectedDirectory { path: PathBuf },

    /// A mutually exclusive variant file that should have been pruned.
    #[error("expected file {path} to be absent")]
    UnexpectedFile { path: PathBuf },

    /// Filesystem error during a walk or scan, with annotated path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`ValidationError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ValidationError {
    ValidationError::Io {
        path: path.into(),
        source,
    }
}
