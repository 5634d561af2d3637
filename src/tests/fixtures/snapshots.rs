use crate::modules::snapshots::core::selection::SnapshotMetadata;
use crate::shared::core::primitives::SequenceNr;
use serde::{Deserialize, Serialize};

pub const BASE_TIMESTAMP: i64 = 1_700_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    pub value: i64,
}

/// Metadata for `entity_id` at `sequence_nr`, stamped `sequence_nr` ms after
/// BASE_TIMESTAMP, and a counter holding `value`.
pub fn saved_at(
    entity_id: &str,
    sequence_nr: SequenceNr,
    value: i64,
) -> (SnapshotMetadata, CounterState) {
    (
        SnapshotMetadata::with_timestamp(entity_id, sequence_nr, BASE_TIMESTAMP + sequence_nr),
        CounterState { value },
    )
}
