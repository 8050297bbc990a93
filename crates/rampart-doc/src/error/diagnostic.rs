//! The core diagnostic type for the Rampart document error system.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! error code, an optional offending document fragment, and help text.
//!
//! The YAML value tree this crate consumes carries no source spans, so
//! diagnostics attach the offending fragment rendered back to YAML instead
//! of labeled byte ranges.

use std::fmt;

use serde_yaml::Value;

use crate::error::{Severity, error_code::ErrorCode};

/// A diagnostic message with optional offending-fragment context.
///
/// # Example
///
/// ```text
/// error[E102]: entity has more than one candidate name key
///   offending fragment:
///     phishing: Phishing
///     smishing: Smishing
///   = help: keep one name key per entity; reserved keys are `from`, `backwards`, `implemented`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    fragment: Option<String>,
    help: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            fragment: None,
            help: None,
        }
    }

    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the offending document fragment rendered back to YAML, if any.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach the offending value, rendered back to YAML for display.
    pub fn with_fragment(mut self, value: &Value) -> Self {
        let rendered = serde_yaml::to_string(value)
            .unwrap_or_else(|_| "<unrenderable value>".to_string());
        self.fragment = Some(rendered.trim_end().to_string());
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}[{}]: {}", self.severity, code, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_code() {
        let diag = Diagnostic::error("entity has no name key").with_code(ErrorCode::E101);
        assert_eq!(diag.to_string(), "error[E101]: entity has no name key");
    }

    #[test]
    fn test_display_without_code() {
        let diag = Diagnostic::warning("document has no title");
        assert_eq!(diag.to_string(), "warning: document has no title");
    }

    #[test]
    fn test_fragment_renders_offending_value() {
        let value: Value = serde_yaml::from_str("phish: Phishing\nsmish: Smishing").unwrap();
        let diag = Diagnostic::error("too many keys").with_fragment(&value);

        let fragment = diag.fragment().unwrap();
        assert!(fragment.contains("phish"));
        assert!(fragment.contains("smish"));
    }
}
