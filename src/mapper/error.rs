//! Error type for the mapping pipeline.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros. The unused_assignments lint fires in some
// Rust versions but not others, so `#[expect]` cannot be used here.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use miette::Diagnostic;
use thiserror::Error;


/// Errors raised by a mapper. Any error aborts the whole map call.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum MapperError {
    /// A mapper rejected its input.
    #[error("mapper '{mapper}' failed: {message}")]
    #[diagnostic(code(projgraph::mapper::failed))]
    Failed {
        /// Name of the failing mapper.
        mapper: String,
        /// What went wrong.
        message: String,
    },
}

impl MapperError {
    /// Build a [`MapperError::Failed`].
    #[must_use]
    pub fn failed(mapper: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            mapper: mapper.into(),
            message: message.into(),
        }
    }
}
