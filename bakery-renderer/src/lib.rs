//! # bakery-renderer
//!
//! Tera-based baker that materialises an Ansible deployment skeleton from the
//! embedded template tree plus a [`bakery_core::ScaffoldContext`], then runs
//! post-bake hooks (password injection, key placement, conditional pruning).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bakery_core::ScaffoldContext;
//! use bakery_renderer::Baker;
//!
//! fn bake_default(output_root: &std::path::Path) {
//!     if let Ok(baker) = Baker::new() {
//!         let result = baker.bake(&ScaffoldContext::default(), output_root);
//!         if let Some(dir) = result.project_dir {
//!             println!("baked into {}", dir.display());
//!         }
//!     }
//! }
//! ```

pub mod bake;
pub mod engine;
pub mod error;
pub mod hooks;

pub use bake::{BakeResult, Baker};
pub use engine::TemplateEngine;
pub use error::BakeError;
pub use hooks::{POSTGRES_PASSWORD_SENTINEL, PUBLIC_KEY_FILES};
