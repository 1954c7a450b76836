//! Core types shared across the crate.
//!
//! Currently this is the error type and the crate-wide [`Result`] alias.
//! Recoverable conditions (a component with no template mapping, a template
//! missing from every root) are deliberately *not* errors; see the error
//! taxonomy on [`ComponentryError`].

mod error;

pub use error::{ComponentryError, Result};
