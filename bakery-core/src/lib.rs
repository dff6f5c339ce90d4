//! Bakery core library — scaffold context types and errors.
//!
//! Public API surface:
//! - [`context`] — [`ScaffoldContext`], [`Toggle`], override handling
//! - [`error`] — [`ContextError`]

pub mod context;
pub mod error;

pub use context::{ScaffoldContext, Toggle};
pub use error::ContextError;
