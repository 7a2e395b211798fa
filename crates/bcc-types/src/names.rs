//! # Bounded Name Identifiers
//!
//! Accounts, permissions, and actions are all identified by a `Name`: a
//! short identifier drawn from the alphabet `[a-z1-5.]`, at most 13
//! characters. Names order lexicographically, which fixes the canonical
//! traversal order used throughout authorization checking.
//!
//! The empty name is a sentinel: it keys contract-wide permission links and
//! fills the fields of reserved permission 0. It never identifies a real
//! account or permission.

use crate::errors::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a name in characters.
pub const MAX_NAME_LEN: usize = 13;

/// A bounded chain identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

/// An account identifier.
pub type AccountName = Name;

/// A permission identifier, unique per owning account.
pub type PermissionName = Name;

/// A contract action identifier. Empty means "contract-wide" in link keys.
pub type ActionName = Name;

impl Name {
    /// Parses and validates a name.
    ///
    /// # Errors
    /// `InvalidName` if the string is longer than [`MAX_NAME_LEN`] or
    /// contains characters outside `[a-z1-5.]`.
    pub fn new(s: &str) -> Result<Self, TypesError> {
        if s.len() > MAX_NAME_LEN {
            return Err(TypesError::InvalidName {
                name: s.to_string(),
                reason: format!("longer than {MAX_NAME_LEN} characters"),
            });
        }
        if let Some(c) = s
            .chars()
            .find(|c| !matches!(c, 'a'..='z' | '1'..='5' | '.'))
        {
            return Err(TypesError::InvalidName {
                name: s.to_string(),
                reason: format!("character '{c}' outside [a-z1-5.]"),
            });
        }
        Ok(Name(s.to_string()))
    }

    /// The empty sentinel name.
    pub fn empty() -> Self {
        Name(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constructs a name from a literal known to be valid at compile time.
    ///
    /// Used only for the well-known sentinel names in [`crate::config`];
    /// arbitrary input must go through [`Name::new`].
    pub(crate) fn well_known(s: &'static str) -> Self {
        debug_assert!(Name::new(s).is_ok());
        Name(s.to_string())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Name {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Name::new(s)
    }
}

impl TryFrom<String> for Name {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Name::new(&s)
    }
}

impl From<Name> for String {
    fn from(n: Name) -> String {
        n.0
    }
}
