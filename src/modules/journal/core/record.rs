// Journal record shapes.
//
// Purpose
// - `JournalRecord` is what a log stores: a sequence number, an opaque payload, and
//   the writer and manifest the host tagged it with.
// - `PersistentRepr` is what the host hands in and receives back on replay.
// - `AtomicWrite` groups the reprs the host expects to be applied all-or-nothing.
//
// Boundaries
// - Payloads are never inspected or serialized here.

use crate::shared::core::primitives::{EntityId, SequenceNr};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalRecord<P> {
    pub sequence_nr: SequenceNr,
    pub payload: P,
    pub writer_uuid: Uuid,
    pub manifest: String,
}

impl<P> JournalRecord<P> {
    /// A record with no writer and an empty manifest.
    pub fn new(sequence_nr: SequenceNr, payload: P) -> Self {
        Self {
            sequence_nr,
            payload,
            writer_uuid: Uuid::nil(),
            manifest: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistentRepr<P> {
    pub entity_id: EntityId,
    pub sequence_nr: SequenceNr,
    pub payload: P,
    pub writer_uuid: Uuid,
    pub manifest: String,
}

impl<P> PersistentRepr<P> {
    pub fn new(entity_id: impl Into<EntityId>, sequence_nr: SequenceNr, payload: P) -> Self {
        Self {
            entity_id: entity_id.into(),
            sequence_nr,
            payload,
            writer_uuid: Uuid::now_v7(),
            manifest: String::new(),
        }
    }

    pub fn with_writer(mut self, writer_uuid: Uuid) -> Self {
        self.writer_uuid = writer_uuid;
        self
    }

    pub fn with_manifest(mut self, manifest: impl Into<String>) -> Self {
        self.manifest = manifest.into();
        self
    }

    /// The log does not repeat the entity id in every record.
    pub fn into_record(self) -> JournalRecord<P> {
        JournalRecord {
            sequence_nr: self.sequence_nr,
            payload: self.payload,
            writer_uuid: self.writer_uuid,
            manifest: self.manifest,
        }
    }

    pub fn from_record(entity_id: EntityId, record: JournalRecord<P>) -> Self {
        Self {
            entity_id,
            sequence_nr: record.sequence_nr,
            payload: record.payload,
            writer_uuid: record.writer_uuid,
            manifest: record.manifest,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicWrite<P> {
    pub payloads: Vec<PersistentRepr<P>>,
}

impl<P> AtomicWrite<P> {
    pub fn new(payloads: Vec<PersistentRepr<P>>) -> Self {
        Self { payloads }
    }

    pub fn single(repr: PersistentRepr<P>) -> Self {
        Self {
            payloads: vec![repr],
        }
    }

    /// The entity every payload belongs to, or the reason the batch cannot be applied.
    pub fn entity_id(&self) -> Result<&EntityId, String> {
        let first = self
            .payloads
            .first()
            .ok_or_else(|| "atomic write is empty".to_string())?;
        match self
            .payloads
            .iter()
            .find(|repr| repr.entity_id != first.entity_id)
        {
            Some(other) => Err(format!(
                "atomic write mixes entities '{}' and '{}'",
                first.entity_id, other.entity_id
            )),
            None => Ok(&first.entity_id),
        }
    }

    pub fn lowest_sequence_nr(&self) -> Option<SequenceNr> {
        self.payloads.iter().map(|repr| repr.sequence_nr).min()
    }

    pub fn highest_sequence_nr(&self) -> Option<SequenceNr> {
        self.payloads.iter().map(|repr| repr.sequence_nr).max()
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}
