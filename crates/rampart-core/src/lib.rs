//! Rampart Core Types and Definitions
//!
//! This crate provides the foundational types for the Rampart threat-model
//! diagram pipeline. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Model**: The normalized threat-model document ([`model`] module)
//! - **Flow**: Node/edge records exchanged with the rendering surface
//!   ([`flow`] module)

pub mod color;
pub mod flow;
pub mod geometry;
pub mod identifier;
pub mod model;
