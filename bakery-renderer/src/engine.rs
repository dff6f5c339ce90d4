//! Tera engine over the embedded Ansible skeleton.
//!
//! Template names double as output paths relative to the generated project
//! root. Only the `scaffold.*` namespace is resolved at bake time; Jinja
//! expressions meant for Ansible runtime are wrapped in `{% raw %}` blocks
//! inside the skeleton and survive rendering verbatim.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tera::Tera;

use bakery_core::ScaffoldContext;

use crate::error::{io_err, BakeError};

// ---------------------------------------------------------------------------
// Embedded skeleton — baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("README.md", include_str!("templates/skeleton/README.md")),
    ("ansible.cfg", include_str!("templates/skeleton/ansible.cfg")),
    ("hosts", include_str!("templates/skeleton/hosts")),
    ("site.yml", include_str!("templates/skeleton/site.yml")),
    (
        "group_vars/all.yml",
        include_str!("templates/skeleton/group_vars/all.yml"),
    ),
    (
        "roles/application/tasks/main.yml",
        include_str!("templates/skeleton/roles/application/tasks/main.yml"),
    ),
    (
        "roles/application/handlers/main.yml",
        include_str!("templates/skeleton/roles/application/handlers/main.yml"),
    ),
    (
        "roles/application/templates/nginx_http_config.j2",
        include_str!("templates/skeleton/roles/application/templates/nginx_http_config.j2"),
    ),
    (
        "roles/application/templates/nginx_https_config.j2",
        include_str!("templates/skeleton/roles/application/templates/nginx_https_config.j2"),
    ),
    (
        "roles/celery/tasks/main.yml",
        include_str!("templates/skeleton/roles/celery/tasks/main.yml"),
    ),
    (
        "roles/celery/handlers/main.yml",
        include_str!("templates/skeleton/roles/celery/handlers/main.yml"),
    ),
    (
        "roles/celery/templates/celery.service.j2",
        include_str!("templates/skeleton/roles/celery/templates/celery.service.j2"),
    ),
];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), BakeError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, BakeError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::new();
    for path in files {
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for the skeleton, with optional user overrides.
///
/// `user_template_dir` may contain files that override embedded skeleton
/// entries by relative path, or add new output files to the tree.
pub struct TemplateEngine {
    tera: Tera,
    names: Vec<String>,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`], loading the embedded skeleton plus
    /// any overrides found in `user_template_dir`.
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, BakeError> {
        let mut templates: BTreeMap<String, String> = BTreeMap::new();
        for (name, content) in TPLS {
            templates.insert(
                normalize_template_name(Path::new(name)),
                (*content).to_string(),
            );
        }
        if let Some(dir) = user_template_dir {
            for (name, content) in load_user_templates(dir)? {
                templates.insert(name, content);
            }
        }

        let names: Vec<String> = templates.keys().cloned().collect();
        let mut tera = Tera::default();
        let items: Vec<(String, String)> = templates.into_iter().collect();
        tera.add_raw_templates(items)?;
        Ok(TemplateEngine { tera, names })
    }

    /// Relative output paths this engine will produce, in stable order.
    pub fn template_names(&self) -> &[String] {
        &self.names
    }

    /// Render every template with the supplied context.
    ///
    /// Returns `Vec<(relative_path, rendered_content)>` — one entry per
    /// output file, in [`Self::template_names`] order.
    pub fn render_tree(
        &self,
        ctx: &ScaffoldContext,
    ) -> Result<Vec<(PathBuf, String)>, BakeError> {
        let tera_ctx = tera_context(ctx);
        let mut results = Vec::with_capacity(self.names.len());
        for name in &self.names {
            let content = self.tera.render(name, &tera_ctx)?;
            results.push((PathBuf::from(name), content));
        }
        Ok(results)
    }
}

/// Build the tera context: the flat flag map under the `scaffold` namespace,
/// plus the bake date.
fn tera_context(ctx: &ScaffoldContext) -> tera::Context {
    let mut flags = ctx.to_flag_map();
    flags.insert(
        "generated_on".to_owned(),
        Utc::now().format("%Y-%m-%d").to_string(),
    );
    let mut tera_ctx = tera::Context::new();
    tera_ctx.insert("scaffold", &flags);
    tera_ctx
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
