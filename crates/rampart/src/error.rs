//! Error types for Rampart operations.
//!
//! This module provides the main error type [`RampartError`] which wraps the
//! error conditions that can occur while deriving and laying out a diagram.

use std::io;

use thiserror::Error;

use rampart_doc::error::DocError;

use crate::{export::ExportError, graph::GraphError, layout::LayoutError};

/// The main error type for Rampart operations.
///
/// The `Document` variant carries the offending source alongside the
/// diagnostics so callers can render rich reports.
#[derive(Debug, Error)]
pub enum RampartError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Document { err: DocError, src: String },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl RampartError {
    /// Create a new `Document` error with the associated source text.
    pub fn new_document_error(err: DocError, src: impl Into<String>) -> Self {
        Self::Document {
            err,
            src: src.into(),
        }
    }
}
