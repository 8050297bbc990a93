//! Error codes for the Rampart document diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Document shape errors
//! - `E1xx` - Entity schema errors
//! - `E2xx` - Model validation errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Shape Errors (E0xx)
    // =========================================================================
    /// Input is not valid YAML.
    E000,

    /// Document root must be a mapping.
    ///
    /// A threat model is a mapping with a `title` and entity sections.
    E001,

    /// `title` must be a string.
    E002,

    /// An entity section must be a sequence.
    ///
    /// `facts`, `attacks`, `mitigations`, `goals`, and `boundaries` each hold
    /// a list of entities.
    E003,

    // =========================================================================
    // Entity Schema Errors (E1xx)
    // =========================================================================
    /// An entity must be a mapping with string keys.
    E100,

    /// An entity has no name key.
    ///
    /// After removing the reserved keys (`from`, `backwards`, `implemented`)
    /// exactly one key must remain; it is the entity's name.
    E101,

    /// An entity has more than one candidate name key.
    ///
    /// Only one key outside the reserved set is allowed per entity or origin.
    E102,

    /// An entity label must be a string or empty.
    E103,

    /// `from` must be a sequence of origin references.
    E104,

    /// An origin must be a bare name string or a mapping.
    E105,

    /// `backwards` must be a boolean.
    E106,

    /// `implemented` must be a boolean.
    E107,

    // =========================================================================
    // Model Validation Errors (E2xx)
    // =========================================================================
    /// An entity name is declared more than once.
    ///
    /// Names must be unique across all sections combined; a fact and an
    /// attack may not share a name.
    E200,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_code_name() {
        assert_eq!(ErrorCode::E101.to_string(), "E101");
        assert_eq!(ErrorCode::E200.to_string(), "E200");
    }
}
