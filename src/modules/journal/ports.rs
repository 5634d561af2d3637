// Ports define what a persistent actor host needs from a journal backend.
//
// Purpose
// - Describe the four journal operations as a trait: write, delete-to, replay,
//   and highest sequence number lookup.
//
// Boundaries
// - No storage here. The in memory adapter implements this trait.
//
// Conventions
// - An entity that was never written is not an error. Replay yields nothing and
//   the highest sequence number is 0.

use crate::modules::journal::core::record::{AtomicWrite, PersistentRepr};
use crate::shared::core::primitives::{EntityId, SequenceNr};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    #[error("backend error: {0}")]
    Backend(String),

    /// `entity_id` is None when the batch held no payload to take it from.
    #[error("atomic write rejected: {reason}")]
    Rejected {
        entity_id: Option<EntityId>,
        reason: String,
    },
}

/// Outcome of one `AtomicWrite`, in the order the batches were submitted.
pub type WriteOutcome = Result<(), JournalError>;

#[async_trait]
pub trait AsyncWriteJournal<P: Clone + Send + Sync + 'static>: Send + Sync {
    /// Apply each batch all-or-nothing. The outer error means no batch was looked at.
    async fn write_messages(
        &self,
        batches: Vec<AtomicWrite<P>>,
    ) -> Result<Vec<WriteOutcome>, JournalError>;

    async fn delete_messages_to(
        &self,
        entity_id: &str,
        to_sequence_nr: SequenceNr,
    ) -> Result<(), JournalError>;

    /// Invoke `callback` once per record with `from <= sequence_nr <= to`, oldest
    /// first, at most `max` times.
    async fn replay_messages(
        &self,
        entity_id: &str,
        from_sequence_nr: SequenceNr,
        to_sequence_nr: SequenceNr,
        max: u64,
        callback: &mut (dyn FnMut(PersistentRepr<P>) + Send),
    ) -> Result<(), JournalError>;

    async fn read_highest_sequence_nr(
        &self,
        entity_id: &str,
        from_sequence_nr: SequenceNr,
    ) -> Result<SequenceNr, JournalError>;
}
