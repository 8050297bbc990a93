//! The DocError type for wrapping document diagnostics.
//!
//! [`DocError`] wraps one or more [`Diagnostic`]s that occurred while
//! decoding and validating a threat-model document.

use std::fmt;

use crate::error::Diagnostic;

/// Error type for the document decoding lifecycle.
///
/// Wraps one or more diagnostics. A `DocError` always contains at least one
/// error-severity diagnostic; warnings ride along for context.
#[derive(Debug)]
pub struct DocError {
    diagnostics: Vec<Diagnostic>,
}

impl DocError {
    /// Create a new document error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for DocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for DocError {}

impl From<Diagnostic> for DocError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for DocError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}
