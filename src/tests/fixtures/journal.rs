use crate::modules::journal::core::record::{AtomicWrite, PersistentRepr};
use crate::shared::core::primitives::SequenceNr;

/// A repr whose payload names its entity and sequence number, e.g. "A-3".
pub fn repr(entity_id: &str, sequence_nr: SequenceNr) -> PersistentRepr<String> {
    PersistentRepr::new(entity_id, sequence_nr, format!("{entity_id}-{sequence_nr}"))
}

/// One atomic write for `entity_id` holding `sequence_nrs` in the given order.
pub fn batch_of(entity_id: &str, sequence_nrs: &[SequenceNr]) -> AtomicWrite<String> {
    AtomicWrite::new(
        sequence_nrs
            .iter()
            .map(|sequence_nr| repr(entity_id, *sequence_nr))
            .collect(),
    )
}
