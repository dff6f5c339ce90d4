//! End-to-end generation scenarios: bake a skeleton with a given context,
//! then validate the materialised tree.

use std::fs;
use std::path::{Path, PathBuf};

use bakery_core::{ScaffoldContext, Toggle};
use bakery_renderer::{BakeResult, Baker, PUBLIC_KEY_FILES};
use bakery_validator::{checks, Validator};
use rstest::rstest;
use tempfile::TempDir;

fn bake(ctx: &ScaffoldContext) -> (TempDir, BakeResult) {
    let _ = env_logger::builder().is_test(true).try_init();
    let out = TempDir::new().expect("output tempdir");
    let baker = Baker::new().expect("baker over embedded skeleton");
    let result = baker.bake(ctx, out.path());
    (out, result)
}

fn nginx_template(project: &Path, file_name: &str) -> PathBuf {
    project
        .join("roles")
        .join("application")
        .join("templates")
        .join(file_name)
}

#[test]
fn default_configuration() {
    let ctx = ScaffoldContext::default();
    let (_out, result) = bake(&ctx);

    let project = checks::require_success(&result).expect("bake succeeds");
    assert_eq!(
        project.file_name().and_then(|n| n.to_str()),
        Some(ctx.ansible_project_slug.as_str())
    );
    assert!(project.is_dir());

    let validator = Validator::new();
    let paths = validator.build_files_list(project).expect("non-empty tree");
    validator
        .check_substitutions(&paths)
        .expect("all scaffold variables replaced");

    // Defaults carry letsencrypt enabled, so the plain-HTTP variant is gone.
    checks::check_file_absent(&nginx_template(project, "nginx_http_config.j2"))
        .expect("HTTP variant pruned under defaults");
}

#[test]
fn postgres_password_hook() {
    let (_out, result) = bake(&ScaffoldContext::default());
    let project = checks::require_success(&result).expect("bake succeeds");

    let validator = Validator::new();
    let paths = validator.build_files_list(project).expect("non-empty tree");
    validator
        .check_secret_replaced(&paths)
        .expect("password sentinel replaced in every file");
}

#[rstest]
#[case::enabled(Toggle::Enabled)]
#[case::disabled(Toggle::Disabled)]
fn public_key_placement(#[case] toggle: Toggle) {
    let mut ctx = ScaffoldContext::default();
    ctx.add_public_key = toggle;
    ctx.public_key = Some("ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAA ci@bakery".to_owned());

    let (_out, result) = bake(&ctx);
    let project = checks::require_success(&result).expect("bake succeeds");

    // Both key files exist either way; the toggle only decides emptiness.
    for name in PUBLIC_KEY_FILES {
        let path = project
            .join("ansible_vars")
            .join("public_keys")
            .join(name);
        match toggle {
            Toggle::Enabled => {
                checks::check_file_nonempty(&path).expect("key material written")
            }
            Toggle::Disabled => checks::check_file_empty(&path).expect("key file truncated"),
        }
    }
}

#[test]
fn added_celery_role() {
    let mut ctx = ScaffoldContext::default();
    ctx.add_celery_support = Toggle::Enabled;

    let (_out, result) = bake(&ctx);
    let project = checks::require_success(&result).expect("bake succeeds");
    checks::check_dir_exists(&project.join("roles").join("celery")).expect("celery role kept");
}

#[test]
fn removed_celery_role() {
    let mut ctx = ScaffoldContext::default();
    ctx.add_celery_support = Toggle::Disabled;

    let (_out, result) = bake(&ctx);
    let project = checks::require_success(&result).expect("bake succeeds");
    checks::check_dir_absent(&project.join("roles").join("celery")).expect("celery role pruned");
}

#[test]
fn letsencrypt_removes_http_config() {
    let mut ctx = ScaffoldContext::default();
    ctx.add_letsencrypt_certificate = Toggle::Enabled;

    let (_out, result) = bake(&ctx);
    let project = checks::require_success(&result).expect("bake succeeds");
    checks::check_file_absent(&nginx_template(project, "nginx_http_config.j2"))
        .expect("HTTP variant pruned");
    assert!(
        nginx_template(project, "nginx_https_config.j2").is_file(),
        "exactly one variant must survive"
    );
}

#[test]
fn no_letsencrypt_removes_https_config() {
    let mut ctx = ScaffoldContext::default();
    ctx.add_letsencrypt_certificate = Toggle::Disabled;

    let (_out, result) = bake(&ctx);
    let project = checks::require_success(&result).expect("bake succeeds");
    checks::check_file_absent(&nginx_template(project, "nginx_https_config.j2"))
        .expect("HTTPS variant pruned");
    assert!(
        nginx_template(project, "nginx_http_config.j2").is_file(),
        "exactly one variant must survive"
    );
}

#[test]
fn overridden_context_still_renders_cleanly() {
    let mut overrides = std::collections::BTreeMap::new();
    overrides.insert("ansible_project_slug".to_owned(), "shop_ansible".to_owned());
    overrides.insert("application_user".to_owned(), "deploy".to_owned());
    overrides.insert("add_letsencrypt_certificate".to_owned(), "n".to_owned());
    let ctx = ScaffoldContext::from_overrides(&overrides).expect("valid overrides");

    let (_out, result) = bake(&ctx);
    let project = checks::require_success(&result).expect("bake succeeds");
    assert!(project.ends_with("shop_ansible"));

    let validator = Validator::new();
    let paths = validator.build_files_list(project).expect("non-empty tree");
    validator.check_substitutions(&paths).expect("clean substitutions");
    validator.check_secret_replaced(&paths).expect("sentinel replaced");

    let group_vars = fs::read_to_string(project.join("group_vars").join("all.yml")).unwrap();
    assert!(group_vars.contains("application_user: deploy"));
}

#[test]
fn failed_bake_aborts_the_scenario() {
    let _ = env_logger::builder().is_test(true).try_init();

    // A user template referencing a key outside the context makes the
    // template pass fail; the validator must refuse to go further.
    let templates = TempDir::new().expect("template dir");
    fs::write(
        templates.path().join("broken.yml"),
        "value: {{ scaffold.not_a_key }}\n",
    )
    .expect("write broken template");

    let out = TempDir::new().expect("output tempdir");
    let baker = Baker::with_template_dir(templates.path()).expect("baker");
    let result = baker.bake(&ScaffoldContext::default(), out.path());

    assert_eq!(result.exit_code, 1);
    let err = checks::require_success(&result).unwrap_err();
    assert!(err.to_string().contains("bake failed"), "got: {err}");
}
