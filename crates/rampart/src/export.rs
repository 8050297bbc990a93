//! Exporting positioned diagrams for external renderers.
//!
//! The rendering widget is an external collaborator, so the pipeline's final
//! artifact is data, not pixels: a JSON document any widget can consume.

pub mod json;

use thiserror::Error;

/// Errors raised while exporting a diagram.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The diagram could not be serialized.
    #[error("failed to serialize diagram: {0}")]
    Serialize(#[from] serde_json::Error),
}
