// Snapshot metadata and the criteria a host uses to pick a snapshot.
//
// Purpose
// - Describe which entity and sequence number a snapshot was taken at, and when.
// - Decide whether a stored snapshot qualifies for a load or a bulk delete.

use crate::shared::core::primitives::{EntityId, SequenceNr, SequenceRange};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub entity_id: EntityId,
    pub sequence_nr: SequenceNr,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl SnapshotMetadata {
    /// Metadata stamped with the current time.
    pub fn new(entity_id: impl Into<EntityId>, sequence_nr: SequenceNr) -> Self {
        Self::with_timestamp(entity_id, sequence_nr, Utc::now().timestamp_millis())
    }

    pub fn with_timestamp(
        entity_id: impl Into<EntityId>,
        sequence_nr: SequenceNr,
        timestamp: i64,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            sequence_nr,
            timestamp,
        }
    }
}

/// Bounds are inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSelectionCriteria {
    pub max_sequence_nr: SequenceNr,
    pub max_timestamp: i64,
    pub min_sequence_nr: SequenceNr,
    pub min_timestamp: i64,
}

impl Default for SnapshotSelectionCriteria {
    fn default() -> Self {
        Self::latest()
    }
}

impl SnapshotSelectionCriteria {
    /// Any snapshot qualifies; loading picks the youngest.
    pub fn latest() -> Self {
        Self {
            max_sequence_nr: SequenceNr::MAX,
            max_timestamp: i64::MAX,
            min_sequence_nr: 0,
            min_timestamp: 0,
        }
    }

    /// No snapshot qualifies.
    pub fn none() -> Self {
        Self {
            max_sequence_nr: 0,
            max_timestamp: 0,
            min_sequence_nr: 0,
            min_timestamp: 0,
        }
    }

    pub fn up_to(max_sequence_nr: SequenceNr) -> Self {
        Self {
            max_sequence_nr,
            ..Self::latest()
        }
    }

    pub fn with_max_timestamp(self, max_timestamp: i64) -> Self {
        Self {
            max_timestamp,
            ..self
        }
    }

    pub fn with_min_sequence_nr(self, min_sequence_nr: SequenceNr) -> Self {
        Self {
            min_sequence_nr,
            ..self
        }
    }

    pub fn with_min_timestamp(self, min_timestamp: i64) -> Self {
        Self {
            min_timestamp,
            ..self
        }
    }

    pub fn matches(&self, metadata: &SnapshotMetadata) -> bool {
        SequenceRange::new(self.min_sequence_nr, self.max_sequence_nr)
            .contains(metadata.sequence_nr)
            && self.min_timestamp <= metadata.timestamp
            && metadata.timestamp <= self.max_timestamp
    }
}

/// A stored snapshot together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedSnapshot<S> {
    pub metadata: SnapshotMetadata,
    pub snapshot: S,
}
