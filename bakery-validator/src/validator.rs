//! Line scans over a baked tree: unresolved `{{ scaffold.* }}` placeholders
//! and the postgres password sentinel.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use bakery_renderer::POSTGRES_PASSWORD_SENTINEL;

use crate::error::{io_err, ValidationError};
use crate::sniff::{BinarySniff, ContentSniffer};
use crate::walk;

/// Fixed grammar for an unresolved template expression: two braces, optional
/// single space, the `scaffold` namespace, a dot, any key, two closing
/// braces. Permissive on the key by design — any survivor is a defect.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s?scaffold[.](.*?)\}\}").expect("invalid placeholder pattern")
});

/// Scans a generated project tree for rendering defects.
///
/// Holds only the binary sniffer; every operation is a stateless pass over
/// the paths it is given. Files are opened and closed one at a time.
pub struct Validator {
    sniffer: Box<dyn BinarySniff>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// A validator with the default content-sniffing heuristic.
    pub fn new() -> Self {
        Self::with_sniffer(Box::new(ContentSniffer))
    }

    /// A validator with a caller-supplied binary detector.
    pub fn with_sniffer(sniffer: Box<dyn BinarySniff>) -> Self {
        Validator { sniffer }
    }

    /// Enumerate every generated file under `root`. See
    /// [`walk::build_files_list`].
    pub fn build_files_list(&self, root: &Path) -> Result<Vec<PathBuf>, ValidationError> {
        walk::build_files_list(root)
    }

    /// No text file may still contain a `{{ scaffold.* }}` expression.
    /// Binary files are skipped via the sniffer, never by extension.
    pub fn check_substitutions(&self, paths: &[PathBuf]) -> Result<(), ValidationError> {
        self.scan_text_files(paths, |path, line_no, line| {
            match PLACEHOLDER_RE.find(line) {
                Some(found) => Err(ValidationError::UnresolvedPlaceholder {
                    path: path.to_path_buf(),
                    line: line_no,
                    snippet: found.as_str().to_owned(),
                }),
                None => Ok(()),
            }
        })
    }

    /// The password sentinel must never survive a bake. Checked separately
    /// from [`Self::check_substitutions`] because the sentinel is injected by
    /// the post-bake hook, not by the template pass.
    pub fn check_secret_replaced(&self, paths: &[PathBuf]) -> Result<(), ValidationError> {
        self.scan_text_files(paths, |path, _, line| {
            if line.contains(POSTGRES_PASSWORD_SENTINEL) {
                return Err(ValidationError::UnresolvedSecret {
                    path: path.to_path_buf(),
                });
            }
            Ok(())
        })
    }

    fn scan_text_files<F>(&self, paths: &[PathBuf], mut check: F) -> Result<(), ValidationError>
    where
        F: FnMut(&Path, usize, &str) -> Result<(), ValidationError>,
    {
        for path in paths {
            if self.sniffer.is_binary(path).map_err(|e| io_err(path, e))? {
                tracing::debug!("skipping binary file {}", path.display());
                continue;
            }
            let file = File::open(path).map_err(|e| io_err(path, e))?;
            for (idx, line) in BufReader::new(file).lines().enumerate() {
                let line = line.map_err(|e| io_err(path, e))?;
                check(path, idx + 1, &line)?;
            }
        }
        Ok(())
    }
}
