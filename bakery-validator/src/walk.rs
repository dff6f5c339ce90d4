//! File-tree enumeration for a baked project.

use std::path::{Path, PathBuf};

use crate::error::{io_err, ValidationError};

/// Recursively list every file under `root`, sorted for stable reporting.
/// Directories are traversal steps, not entries. An empty tree is itself a
/// defect — a successful bake always produces files.
pub fn build_files_list(root: &Path) -> Result<Vec<PathBuf>, ValidationError> {
    let mut files = Vec::new();
    collect_files(root, &mut files)?;
    if files.is_empty() {
        return Err(ValidationError::EmptyTree {
            root: root.to_path_buf(),
        });
    }
    files.sort();
    Ok(files)
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), ValidationError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}
