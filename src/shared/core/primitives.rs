// Primitives shared by the journal and the snapshot store.
//
// Purpose
// - Name the key every store is partitioned by (EntityId).
// - Provide the inclusive sequence range check used by replay, truncation and
//   snapshot selection.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Sequence numbers are assigned by the host and start above zero.
/// Zero is reserved to mean "nothing recorded".
pub type SequenceNr = i64;

/// Marker for values that may be stored as persisted state.
pub trait PersistedState: Clone + Send + Sync + 'static {}

impl<T> PersistedState for T where T: Clone + Send + Sync + 'static {}

/// Persistence identity of one logical entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Inclusive range of sequence numbers, `from..=to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRange {
    pub from: SequenceNr,
    pub to: SequenceNr,
}

impl SequenceRange {
    pub fn new(from: SequenceNr, to: SequenceNr) -> Self {
        Self { from, to }
    }

    pub fn all() -> Self {
        Self::new(SequenceNr::MIN, SequenceNr::MAX)
    }

    /// Everything up to and including `to`.
    pub fn up_to(to: SequenceNr) -> Self {
        Self::new(SequenceNr::MIN, to)
    }

    /// Everything at or above `from`.
    pub fn at_or_above(from: SequenceNr) -> Self {
        Self::new(from, SequenceNr::MAX)
    }

    pub fn contains(&self, sequence_nr: SequenceNr) -> bool {
        self.from <= sequence_nr && sequence_nr <= self.to
    }

    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }
}
