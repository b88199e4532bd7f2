//! Opaque game state identifiers.
//!
//! States arrive as Base64-encoded board hashes produced by the game-tree
//! export. They are compared and hashed, never decoded.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Hash of the empty 4x5 board every critical path starts from.
///
/// Bytes `[4, 5, 0, 0, 0, 0, 0]`: row and column count followed by twenty
/// two-bit fields, all unoccupied.
pub const INITIAL_STATE: &str = "BAUAAAAAAA==";

/// Identifier for a game state in the transition graph.
///
/// # Examples
///
/// ```
/// use critpath::identifiers::StateId;
///
/// let state = StateId::new("BAUAAAAAAA==");
/// assert_eq!(state, StateId::initial());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The fixed starting state of every walk.
    pub fn initial() -> Self {
        Self::new(INITIAL_STATE)
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the identifier into its inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for StateId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for StateId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<StateId> for &str {
    fn eq(&self, other: &StateId) -> bool {
        *self == other.as_str()
    }
}

impl Borrow<str> for StateId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for StateId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for StateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for StateId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
