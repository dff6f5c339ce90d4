//! Error types for bakery-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while baking a project skeleton.
#[derive(Debug, Error)]
pub enum BakeError {
    /// Tera template engine error (parse or render).
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Filesystem error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `dirs::home_dir()` returned `None` — cannot fall back to `~/.ssh`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// Key placement is enabled but no key material was provided and none
    /// was found on disk.
    #[error("public key placement enabled but no key found under {searched}")]
    PublicKeyNotFound { searched: PathBuf },
}

/// Convenience constructor for [`BakeError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BakeError {
    BakeError::Io {
        path: path.into(),
        source,
    }
}
