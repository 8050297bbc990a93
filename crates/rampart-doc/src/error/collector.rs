//! Collector for accumulating diagnostics during decoding.
//!
//! The [`DiagnosticCollector`] lets the decoder report every malformed
//! entity in a document instead of failing on the first one.

use crate::error::{Diagnostic, DocError};

/// A collector for accumulating diagnostics during a decode pass.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if any error-severity diagnostic was emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(DocError)` with all diagnostics,
    ///   warnings included.
    /// - If there are no errors, returns `Ok(())`. Warnings are currently
    ///   discarded in the success case.
    pub fn finish(self) -> Result<(), DocError> {
        if self.has_errors {
            Err(DocError::new(self.diagnostics))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_warnings_do_not_fail() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("document has no title"));

        assert!(!collector.has_errors());
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_errors_fail_with_all_diagnostics() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("unknown section `notes` ignored"));
        collector.emit(Diagnostic::error("entity has no name key").with_code(ErrorCode::E101));
        collector.emit(Diagnostic::error("entity has no name key").with_code(ErrorCode::E101));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
    }
}
