//! Scaffold context — the typed key/value input that drives baking.
//!
//! The upstream skeleton took a free-form string mapping; here the same keys
//! are an explicit struct with a typed [`Toggle`] per optional feature.
//! Overrides are validated when they are applied, not at render time, so an
//! unknown key or a malformed flag never reaches the template engine.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ContextError;

// ---------------------------------------------------------------------------
// Toggle
// ---------------------------------------------------------------------------

/// A boolean-like feature flag, encoded as `"y"` / `"n"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Toggle {
    Enabled,
    #[default]
    Disabled,
}

impl Toggle {
    /// Wire encoding used in flag maps and templates.
    pub fn as_flag(self) -> &'static str {
        match self {
            Toggle::Enabled => "y",
            Toggle::Disabled => "n",
        }
    }

    /// Parse the wire encoding. Anything but `"y"` / `"n"` is rejected;
    /// `key` is carried into the error for context.
    pub fn from_flag(key: &str, value: &str) -> Result<Toggle, ContextError> {
        match value {
            "y" => Ok(Toggle::Enabled),
            "n" => Ok(Toggle::Disabled),
            _ => Err(ContextError::InvalidFlag {
                key: key.to_owned(),
                value: value.to_owned(),
            }),
        }
    }

    pub fn is_enabled(self) -> bool {
        matches!(self, Toggle::Enabled)
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_flag())
    }
}

// ---------------------------------------------------------------------------
// Context keys
// ---------------------------------------------------------------------------

pub const KEY_ANSIBLE_PROJECT_NAME: &str = "ansible_project_name";
pub const KEY_ANSIBLE_PROJECT_SLUG: &str = "ansible_project_slug";
pub const KEY_APPLICATION_NAME: &str = "application_name";
pub const KEY_APPLICATION_SLUG: &str = "application_slug";
pub const KEY_APPLICATION_USER: &str = "application_user";
pub const KEY_APPLICATION_ROOT: &str = "application_root";
pub const KEY_ADD_PUBLIC_KEY: &str = "add_public_key";
pub const KEY_ADD_CELERY_SUPPORT: &str = "add_celery_support";
pub const KEY_ADD_LETSENCRYPT_CERTIFICATE: &str = "add_letsencrypt_certificate";
pub const KEY_PUBLIC_KEY: &str = "public_key";

// ---------------------------------------------------------------------------
// ScaffoldContext
// ---------------------------------------------------------------------------

/// The full input for one bake: naming, the deployment path, and the three
/// feature toggles. Scenarios clone the default and flip what they need;
/// the shared default is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldContext {
    /// Human-readable project name, used in generated documentation.
    pub ansible_project_name: String,
    /// Directory-safe slug; the generated project directory is named after it.
    pub ansible_project_slug: String,
    pub application_name: String,
    pub application_slug: String,
    /// Unix account the application deploys as.
    pub application_user: String,
    /// Deployment root on the target host.
    pub application_root: PathBuf,
    /// Place the operator's SSH public key into the generated key files.
    /// Disabled leaves both key files present but zero-length.
    pub add_public_key: Toggle,
    /// Include the celery worker role subtree.
    pub add_celery_support: Toggle,
    /// Enabled keeps the HTTPS nginx config and drops the HTTP one;
    /// Disabled does the opposite. Exactly one variant survives.
    pub add_letsencrypt_certificate: Toggle,
    /// Key material for the key-placement hook. When `None` and the toggle is
    /// enabled, the renderer falls back to `~/.ssh` discovery.
    pub public_key: Option<String>,
}

impl Default for ScaffoldContext {
    fn default() -> Self {
        ScaffoldContext {
            ansible_project_name: "store ansible".to_owned(),
            ansible_project_slug: "store_ansible".to_owned(),
            application_name: "store".to_owned(),
            application_slug: "store".to_owned(),
            application_user: "hack".to_owned(),
            application_root: PathBuf::from("/hack/store"),
            add_public_key: Toggle::Disabled,
            add_celery_support: Toggle::Enabled,
            add_letsencrypt_certificate: Toggle::Enabled,
            public_key: None,
        }
    }
}

impl ScaffoldContext {
    /// Build a context from the defaults plus a flat override map.
    pub fn from_overrides(overrides: &BTreeMap<String, String>) -> Result<Self, ContextError> {
        let mut ctx = ScaffoldContext::default();
        ctx.apply_overrides(overrides)?;
        Ok(ctx)
    }

    /// Shallow-apply a flat override map. Key names and toggle domains are
    /// validated; the context is unchanged if any entry is invalid.
    pub fn apply_overrides(
        &mut self,
        overrides: &BTreeMap<String, String>,
    ) -> Result<(), ContextError> {
        let mut next = self.clone();
        for (key, value) in overrides {
            match key.as_str() {
                KEY_ANSIBLE_PROJECT_NAME => next.ansible_project_name = value.clone(),
                KEY_ANSIBLE_PROJECT_SLUG => next.ansible_project_slug = value.clone(),
                KEY_APPLICATION_NAME => next.application_name = value.clone(),
                KEY_APPLICATION_SLUG => next.application_slug = value.clone(),
                KEY_APPLICATION_USER => next.application_user = value.clone(),
                KEY_APPLICATION_ROOT => next.application_root = PathBuf::from(value),
                KEY_ADD_PUBLIC_KEY => next.add_public_key = Toggle::from_flag(key, value)?,
                KEY_ADD_CELERY_SUPPORT => {
                    next.add_celery_support = Toggle::from_flag(key, value)?
                }
                KEY_ADD_LETSENCRYPT_CERTIFICATE => {
                    next.add_letsencrypt_certificate = Toggle::from_flag(key, value)?
                }
                KEY_PUBLIC_KEY => next.public_key = Some(value.clone()),
                _ => return Err(ContextError::UnknownKey { key: key.clone() }),
            }
        }
        *self = next;
        Ok(())
    }

    /// Load overrides from a YAML mapping file and apply them to the defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ContextError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ContextError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: BTreeMap<String, String> =
            serde_yaml::from_str(&raw).map_err(|source| ContextError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        ScaffoldContext::from_overrides(&overrides)
    }

    /// Flatten to the renderer-boundary encoding: every key as a string,
    /// toggles as `"y"` / `"n"`. `public_key` is carried only when set — it
    /// is hook input, not a template variable.
    pub fn to_flag_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(
            KEY_ANSIBLE_PROJECT_NAME.to_owned(),
            self.ansible_project_name.clone(),
        );
        map.insert(
            KEY_ANSIBLE_PROJECT_SLUG.to_owned(),
            self.ansible_project_slug.clone(),
        );
        map.insert(KEY_APPLICATION_NAME.to_owned(), self.application_name.clone());
        map.insert(KEY_APPLICATION_SLUG.to_owned(), self.application_slug.clone());
        map.insert(KEY_APPLICATION_USER.to_owned(), self.application_user.clone());
        map.insert(
            KEY_APPLICATION_ROOT.to_owned(),
            self.application_root.display().to_string(),
        );
        map.insert(
            KEY_ADD_PUBLIC_KEY.to_owned(),
            self.add_public_key.as_flag().to_owned(),
        );
        map.insert(
            KEY_ADD_CELERY_SUPPORT.to_owned(),
            self.add_celery_support.as_flag().to_owned(),
        );
        map.insert(
            KEY_ADD_LETSENCRYPT_CERTIFICATE.to_owned(),
            self.add_letsencrypt_certificate.as_flag().to_owned(),
        );
        if let Some(key) = &self.public_key {
            map.insert(KEY_PUBLIC_KEY.to_owned(), key.clone());
        }
        map
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    #[rstest]
    #[case("y", Toggle::Enabled)]
    #[case("n", Toggle::Disabled)]
    fn toggle_parses_wire_flags(#[case] raw: &str, #[case] expected: Toggle) {
        let toggle = Toggle::from_flag("add_celery_support", raw).expect("valid flag");
        assert_eq!(toggle, expected);
        assert_eq!(toggle.as_flag(), raw);
    }

    #[rstest]
    #[case("yes")]
    #[case("Y")]
    #[case("true")]
    #[case("")]
    fn toggle_rejects_anything_else(#[case] raw: &str) {
        let err = Toggle::from_flag("add_public_key", raw).unwrap_err();
        assert!(matches!(err, ContextError::InvalidFlag { .. }), "got: {err}");
        assert!(err.to_string().contains("add_public_key"));
    }

    #[test]
    fn defaults_match_store_skeleton() {
        let ctx = ScaffoldContext::default();
        assert_eq!(ctx.ansible_project_slug, "store_ansible");
        assert_eq!(ctx.application_user, "hack");
        assert_eq!(ctx.application_root, PathBuf::from("/hack/store"));
        assert_eq!(ctx.add_public_key, Toggle::Disabled);
        assert_eq!(ctx.add_celery_support, Toggle::Enabled);
        assert_eq!(ctx.add_letsencrypt_certificate, Toggle::Enabled);
    }

    #[test]
    fn overrides_flip_only_named_keys() {
        let mut overrides = BTreeMap::new();
        overrides.insert("add_celery_support".to_owned(), "n".to_owned());
        overrides.insert("application_name".to_owned(), "shop".to_owned());

        let ctx = ScaffoldContext::from_overrides(&overrides).expect("valid overrides");
        assert_eq!(ctx.add_celery_support, Toggle::Disabled);
        assert_eq!(ctx.application_name, "shop");
        // Untouched keys keep their defaults.
        assert_eq!(ctx.ansible_project_slug, "store_ansible");
    }

    #[test]
    fn unknown_key_is_rejected_and_context_unchanged() {
        let mut ctx = ScaffoldContext::default();
        let mut overrides = BTreeMap::new();
        overrides.insert("application_name".to_owned(), "shop".to_owned());
        overrides.insert("add_your_pulic_key".to_owned(), "y".to_owned());

        let err = ctx.apply_overrides(&overrides).unwrap_err();
        assert!(matches!(err, ContextError::UnknownKey { .. }), "got: {err}");
        assert_eq!(
            ctx,
            ScaffoldContext::default(),
            "a failed override batch must not partially apply"
        );
    }

    #[test]
    fn flag_map_round_trips_through_overrides() {
        let mut ctx = ScaffoldContext::default();
        ctx.add_public_key = Toggle::Enabled;
        ctx.public_key = Some("ssh-ed25519 AAAA test@host".to_owned());

        let map = ctx.to_flag_map();
        assert_eq!(map.get("add_public_key").map(String::as_str), Some("y"));
        assert_eq!(
            map.get("application_root").map(String::as_str),
            Some("/hack/store")
        );

        let rebuilt = ScaffoldContext::from_overrides(&map).expect("round trip");
        assert_eq!(rebuilt, ctx);
    }

    #[test]
    fn flag_map_omits_unset_public_key() {
        let map = ScaffoldContext::default().to_flag_map();
        assert!(!map.contains_key("public_key"));
    }

    #[test]
    fn yaml_overrides_load_and_apply() {
        let dir = assert_fs::TempDir::new().expect("tempdir");
        let path = dir.path().join("context.yml");
        fs::write(
            &path,
            "ansible_project_slug: shop_ansible\nadd_letsencrypt_certificate: \"n\"\n",
        )
        .expect("write overrides");

        let ctx = ScaffoldContext::from_yaml_file(&path).expect("load overrides");
        assert_eq!(ctx.ansible_project_slug, "shop_ansible");
        assert_eq!(ctx.add_letsencrypt_certificate, Toggle::Disabled);
    }

    #[test]
    fn corrupt_yaml_reports_parse_error_with_path() {
        let dir = assert_fs::TempDir::new().expect("tempdir");
        let path = dir.path().join("context.yml");
        fs::write(&path, ": : corrupt : yaml : !!!\n  - broken: [unclosed").expect("write");

        let err = ScaffoldContext::from_yaml_file(&path).unwrap_err();
        assert!(matches!(err, ContextError::Parse { .. }), "got: {err}");
        assert!(err.to_string().contains("context.yml"));
    }

    #[test]
    fn missing_override_file_reports_io_error() {
        let dir = assert_fs::TempDir::new().expect("tempdir");
        let err = ScaffoldContext::from_yaml_file(&dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, ContextError::Io { .. }), "got: {err}");
    }
}
