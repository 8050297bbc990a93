//! Error and diagnostic system for the Rampart document decoder.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Offending-fragment context on diagnostics
//! - Severity levels
//! - A diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning with an optional error code, the offending
//! document fragment, and help text. Multiple diagnostics are wrapped in
//! [`DocError`] for returning from the decoding lifecycle.
//!
//! # Example
//!
//! ```
//! # use rampart_doc::error::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::error("entity has more than one candidate name key")
//!     .with_code(ErrorCode::E102)
//!     .with_help("keep one name key per entity");
//! assert_eq!(diag.code(), Some(ErrorCode::E102));
//! ```

mod collector;
mod diagnostic;
mod doc_error;
mod error_code;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use doc_error::DocError;
pub use error_code::ErrorCode;
pub use severity::Severity;
