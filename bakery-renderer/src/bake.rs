//! Bake entrypoint — renders the skeleton into an output directory and runs
//! the post-bake hooks.

use std::path::{Path, PathBuf};

use bakery_core::ScaffoldContext;

use crate::engine::TemplateEngine;
use crate::error::{io_err, BakeError};
use crate::hooks;

// ---------------------------------------------------------------------------
// BakeResult
// ---------------------------------------------------------------------------

/// Outcome of one bake, shaped like a captured process result: an exit code,
/// an optional error, and the generated project root on success. Validators
/// gate on this before touching the tree.
#[derive(Debug)]
pub struct BakeResult {
    /// `0` on success, `1` on any failure.
    pub exit_code: i32,
    /// The failure, when there was one.
    pub error: Option<BakeError>,
    /// Root of the generated project, named after `ansible_project_slug`.
    pub project_dir: Option<PathBuf>,
}

impl BakeResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0 && self.error.is_none() && self.project_dir.is_some()
    }
}

// ---------------------------------------------------------------------------
// Baker
// ---------------------------------------------------------------------------

/// Bakes Ansible project skeletons. Create once with [`Baker::new`] and
/// reuse; each [`Baker::bake`] call is an independent transaction.
pub struct Baker {
    engine: TemplateEngine,
}

impl Baker {
    /// Construct a [`Baker`] over the embedded skeleton.
    pub fn new() -> Result<Self, BakeError> {
        Ok(Baker {
            engine: TemplateEngine::new(None)?,
        })
    }

    /// Construct a [`Baker`] whose skeleton is extended/overridden by the
    /// templates under `dir`.
    pub fn with_template_dir(dir: &Path) -> Result<Self, BakeError> {
        Ok(Baker {
            engine: TemplateEngine::new(Some(dir))?,
        })
    }

    /// Bake one project under `output_root`.
    ///
    /// Never panics and never returns `Err` — failures are folded into the
    /// [`BakeResult`], matching the captured-process shape scenario code
    /// expects.
    pub fn bake(&self, ctx: &ScaffoldContext, output_root: &Path) -> BakeResult {
        match self.try_bake(ctx, output_root) {
            Ok(project_dir) => BakeResult {
                exit_code: 0,
                error: None,
                project_dir: Some(project_dir),
            },
            Err(error) => {
                tracing::warn!("bake failed: {error}");
                BakeResult {
                    exit_code: 1,
                    error: Some(error),
                    project_dir: None,
                }
            }
        }
    }

    fn try_bake(&self, ctx: &ScaffoldContext, output_root: &Path) -> Result<PathBuf, BakeError> {
        let project_dir = output_root.join(&ctx.ansible_project_slug);
        std::fs::create_dir_all(&project_dir).map_err(|e| io_err(&project_dir, e))?;

        let outputs = self.engine.render_tree(ctx)?;
        let file_count = outputs.len();
        for (rel, content) in outputs {
            let path = project_dir.join(rel);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
            }
            std::fs::write(&path, content).map_err(|e| io_err(&path, e))?;
        }

        hooks::apply(&project_dir, ctx)?;

        tracing::info!(
            "baked {} templates into {}",
            file_count,
            project_dir.display()
        );
        Ok(project_dir)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
