//! Identifier management using string interning for efficient storage and comparison.
//!
//! Entity names appear in every node, edge, and origin reference of a threat
//! model, so they are interned once and compared as symbols afterwards. This
//! module provides the [`Id`] type backing those names.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Efficient identifier type using string interning.
///
/// Two [`Id`]s created from the same string are equal and share storage, so
/// name lookups and graph-key comparisons are symbol comparisons rather than
/// string comparisons.
///
/// # Examples
///
/// ```
/// use rampart_core::identifier::Id;
///
/// let attack = Id::new("sql-injection");
/// let again = Id::new("sql-injection");
///
/// assert_eq!(attack, again);
/// assert_eq!(attack.to_string(), "sql-injection");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from `&str`, interning the string if it is new.
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = INTERNER
            .get()
            .expect("Interner must be initialized before displaying an Id")
            .lock()
            .expect("Failed to acquire interner lock");
        let name = interner
            .resolve(self.0)
            .expect("Id symbol should exist in interner");
        write!(f, "{name}")
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        *self == Id::new(other)
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
