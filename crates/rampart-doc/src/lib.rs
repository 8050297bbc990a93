//! Document schema and validation for Rampart threat models.
//!
//! A threat-model document is an indentation-based YAML file listing named
//! entities under the sections `facts`, `attacks`, `mitigations`, `goals`,
//! and `boundaries`, with each entity naming the entities that causally lead
//! into it:
//!
//! ```yaml
//! title: Login service
//! facts:
//!   - password-reuse: Users reuse passwords across sites
//! attacks:
//!   - credential-stuffing: Attacker replays leaked credentials
//!     from:
//!       - password-reuse
//! mitigations:
//!   - mfa: Require a second factor
//!     implemented: false
//!     from:
//!       - credential-stuffing: blocks
//!         backwards: true
//! goals:
//!   - account-takeover:
//!     from:
//!       - credential-stuffing
//! ```
//!
//! Raw YAML parsing is external (`serde_yaml`); this crate validates the
//! resulting value tree and normalizes it into
//! [`ThreatModel`](rampart_core::model::ThreatModel) records. The one piece
//! of schema cleverness — an entity's name and label encoded as the single
//! non-reserved key of its mapping — is resolved here and nowhere else.

pub mod error;
pub mod schema;

mod decode;

pub use decode::{decode_document, decode_str};

#[cfg(test)]
mod decode_tests;
