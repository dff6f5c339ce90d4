//! Presence and emptiness checks for toggle-gated artifacts, plus the
//! bake-success precondition gate.

use std::path::Path;

use bakery_renderer::BakeResult;

use crate::error::{io_err, ValidationError};

/// Precondition for every scenario: the bake exited successfully, captured
/// no error, and produced a project directory. Returns that directory.
///
/// A failure here is fatal to the scenario — callers must not run tree
/// checks against a failed bake.
pub fn require_success(result: &BakeResult) -> Result<&Path, ValidationError> {
    if result.exit_code != 0 || result.error.is_some() {
        let message = result
            .error
            .as_ref()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no error captured".to_owned());
        return Err(ValidationError::BakeFailed {
            exit_code: result.exit_code,
            message,
        });
    }
    result
        .project_dir
        .as_deref()
        .ok_or(ValidationError::MissingProjectDir)
}

/// The file exists and carries at least one byte (enabled key placement).
pub fn check_file_nonempty(path: &Path) -> Result<(), ValidationError> {
    let meta = std::fs::metadata(path).map_err(|e| io_err(path, e))?;
    if meta.len() == 0 {
        return Err(ValidationError::ExpectedNonEmpty {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// The file exists but is zero-length (disabled key placement keeps the
/// file, by design of the skeleton's downstream globbing).
pub fn check_file_empty(path: &Path) -> Result<(), ValidationError> {
    let meta = std::fs::metadata(path).map_err(|e| io_err(path, e))?;
    if meta.len() > 0 {
        return Err(ValidationError::ExpectedEmpty {
            path: path.to_path_buf(),
            len: meta.len(),
        });
    }
    Ok(())
}

/// The toggle-gated subtree is present.
pub fn check_dir_exists(path: &Path) -> Result<(), ValidationError> {
    if !path.is_dir() {
        return Err(ValidationError::MissingDirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// The toggle-gated subtree was pruned entirely.
pub fn check_dir_absent(path: &Path) -> Result<(), ValidationError> {
    if path.exists() {
        return Err(ValidationError::UnexpectedDirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// The excluded variant of a mutually exclusive pair is physically absent.
pub fn check_file_absent(path: &Path) -> Result<(), ValidationError> {
    if path.exists() {
        return Err(ValidationError::UnexpectedFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
