//! # bakery-validator
//!
//! Generation validator for baked Ansible skeletons: walks the generated
//! tree and asserts that every template variable was substituted, the
//! password sentinel was replaced, and toggle-gated artifacts match the
//! context that baked them.
//!
//! Each scenario is one stateless render-then-check transaction:
//! [`checks::require_success`] gates on the bake outcome, then
//! [`Validator::build_files_list`] and the scan/check operations run over
//! the materialised tree.

pub mod checks;
pub mod error;
pub mod sniff;
pub mod validator;
pub mod walk;

pub use checks::{
    check_dir_absent, check_dir_exists, check_file_absent, check_file_empty,
    check_file_nonempty, require_success,
};
pub use error::ValidationError;
pub use sniff::{BinarySniff, ContentSniffer};
pub use validator::Validator;
pub use walk::build_files_list;
