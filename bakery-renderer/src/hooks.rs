//! Post-bake hooks — the conditional shaping that runs after the template
//! pass, mirroring the upstream skeleton's post-generation script.
//!
//! Order matters only in that every hook sees the fully rendered tree:
//! 1. Replace the postgres password sentinel with a generated password.
//! 2. Place (or truncate) the SSH public key files.
//! 3. Drop the celery role subtree when worker support is disabled.
//! 4. Drop whichever nginx config variant the TLS toggle excludes.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use bakery_core::ScaffoldContext;

use crate::error::{io_err, BakeError};

/// Literal sentinel left in `group_vars/all.yml` by the template pass.
/// Must never survive a successful bake.
pub const POSTGRES_PASSWORD_SENTINEL: &str = "POSTGRES_PASSWORD!!!";

/// The two key files under `ansible_vars/public_keys`. Both always exist
/// post-bake; they are zero-length when key placement is disabled.
pub const PUBLIC_KEY_FILES: [&str; 2] = ["app_user_keys", "root_user_keys"];

/// Run every hook against a freshly baked project tree.
pub(crate) fn apply(project_dir: &Path, ctx: &ScaffoldContext) -> Result<(), BakeError> {
    inject_postgres_password(project_dir)?;
    place_public_keys(project_dir, ctx)?;
    if !ctx.add_celery_support.is_enabled() {
        remove_celery_role(project_dir)?;
    }
    prune_nginx_variant(project_dir, ctx)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Postgres password
// ---------------------------------------------------------------------------

fn inject_postgres_password(project_dir: &Path) -> Result<(), BakeError> {
    let path = project_dir.join("group_vars").join("all.yml");
    if !path.exists() {
        // A user template tree may drop group_vars entirely.
        return Ok(());
    }
    let content = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    if !content.contains(POSTGRES_PASSWORD_SENTINEL) {
        return Ok(());
    }
    let password = Uuid::new_v4().simple().to_string();
    let replaced = content.replace(POSTGRES_PASSWORD_SENTINEL, &password);
    std::fs::write(&path, replaced).map_err(|e| io_err(&path, e))?;
    tracing::debug!("injected generated postgres password into {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Public keys
// ---------------------------------------------------------------------------

fn place_public_keys(project_dir: &Path, ctx: &ScaffoldContext) -> Result<(), BakeError> {
    let dir = project_dir.join("ansible_vars").join("public_keys");
    std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;

    let material = if ctx.add_public_key.is_enabled() {
        Some(resolve_key_material(ctx)?)
    } else {
        None
    };

    for name in PUBLIC_KEY_FILES {
        let path = dir.join(name);
        // Downstream roles glob this directory, so the files stay present
        // even when key placement is off.
        let content = material.as_deref().unwrap_or("");
        std::fs::write(&path, content).map_err(|e| io_err(&path, e))?;
    }
    Ok(())
}

fn resolve_key_material(ctx: &ScaffoldContext) -> Result<String, BakeError> {
    if let Some(key) = &ctx.public_key {
        return Ok(with_trailing_newline(key));
    }
    let ssh_dir = dirs::home_dir()
        .ok_or(BakeError::HomeNotFound)?
        .join(".ssh");
    for candidate in ["id_ed25519.pub", "id_rsa.pub"] {
        let path = ssh_dir.join(candidate);
        if path.exists() {
            let key = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
            return Ok(with_trailing_newline(key.trim_end()));
        }
    }
    Err(BakeError::PublicKeyNotFound { searched: ssh_dir })
}

fn with_trailing_newline(key: &str) -> String {
    let mut out = key.to_owned();
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Celery role
// ---------------------------------------------------------------------------

fn remove_celery_role(project_dir: &Path) -> Result<(), BakeError> {
    let dir = project_dir.join("roles").join("celery");
    if dir.is_dir() {
        std::fs::remove_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
        tracing::debug!("removed celery role at {}", dir.display());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// nginx config exclusivity
// ---------------------------------------------------------------------------

fn prune_nginx_variant(project_dir: &Path, ctx: &ScaffoldContext) -> Result<(), BakeError> {
    let doomed = if ctx.add_letsencrypt_certificate.is_enabled() {
        "nginx_http_config.j2"
    } else {
        "nginx_https_config.j2"
    };
    let path = nginx_template_path(project_dir, doomed);
    if path.is_file() {
        std::fs::remove_file(&path).map_err(|e| io_err(&path, e))?;
        tracing::debug!("removed nginx variant {}", path.display());
    }
    Ok(())
}

fn nginx_template_path(project_dir: &Path, file_name: &str) -> PathBuf {
    project_dir
        .join("roles")
        .join("application")
        .join("templates")
        .join(file_name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
