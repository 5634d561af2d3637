// In memory implementation of the AsyncWriteJournal port.
//
// Purpose
// - Let persistent actors run in tests and local development without a database.
//
// Responsibilities
// - Keep one JournalLog per entity, created on first write and never removed.
// - Serialize every map and log access behind a single lock over the whole map.
// - Apply each atomic write under one lock acquisition so no writer interleaves inside it.

use crate::modules::journal::core::journal_log::JournalLog;
use crate::modules::journal::core::record::{AtomicWrite, JournalRecord, PersistentRepr};
use crate::modules::journal::ports::{AsyncWriteJournal, JournalError, WriteOutcome};
use crate::shared::config::DeleteMode;
use crate::shared::core::primitives::{EntityId, SequenceNr, SequenceRange};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

pub struct InMemoryJournal<P> {
    logs: Arc<RwLock<HashMap<EntityId, JournalLog<P>>>>,
    delete_mode: DeleteMode,
    is_offline: Arc<AtomicBool>,
}

impl<P> Clone for InMemoryJournal<P> {
    fn clone(&self) -> Self {
        Self {
            logs: Arc::clone(&self.logs),
            delete_mode: self.delete_mode,
            is_offline: Arc::clone(&self.is_offline),
        }
    }
}

impl<P: Clone + Send + Sync + 'static> Default for InMemoryJournal<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone + Send + Sync + 'static> InMemoryJournal<P> {
    pub fn new() -> Self {
        Self::with_delete_mode(DeleteMode::default())
    }

    pub fn with_delete_mode(delete_mode: DeleteMode) -> Self {
        Self {
            logs: Arc::new(RwLock::new(HashMap::new())),
            delete_mode,
            is_offline: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn delete_mode(&self) -> DeleteMode {
        self.delete_mode
    }

    /// Flip between online and offline. Offline, every port operation fails.
    /// Shared by every clone of this handle.
    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// Append one record, creating the entity's log when absent.
    pub async fn add(&self, entity_id: impl Into<EntityId>, record: JournalRecord<P>) {
        let mut guard = self.logs.write().await;
        guard.entry(entity_id.into()).or_default().add(record);
    }

    /// A copy of the entity's log as it is now, or None when it was never written.
    pub async fn get(&self, entity_id: &str) -> Option<JournalLog<P>> {
        self.logs.read().await.get(entity_id).cloned()
    }

    pub async fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.logs.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Drop every log. Returns how many entities were held.
    pub async fn clear(&self) -> usize {
        let mut guard = self.logs.write().await;
        let count = guard.len();
        guard.clear();
        count
    }

    fn ensure_online(&self) -> Result<(), JournalError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(JournalError::Backend("journal offline".into()));
        }
        Ok(())
    }

    async fn write_one(&self, batch: AtomicWrite<P>) -> WriteOutcome {
        let entity_id = match batch.entity_id() {
            Ok(entity_id) => entity_id.clone(),
            Err(reason) => {
                let entity_id = batch.payloads.first().map(|repr| repr.entity_id.clone());
                tracing::warn!(?entity_id, %reason, size = batch.len(), "atomic write rejected");
                return Err(JournalError::Rejected { entity_id, reason });
            }
        };
        let (lowest, highest) = (batch.lowest_sequence_nr(), batch.highest_sequence_nr());
        let size = batch.len();

        let mut guard = self.logs.write().await;
        let log = guard.entry(entity_id.clone()).or_default();
        for repr in batch.payloads {
            log.add(repr.into_record());
        }
        drop(guard);

        tracing::debug!(%entity_id, size, ?lowest, ?highest, "atomic write applied");
        Ok(())
    }
}

#[async_trait::async_trait]
impl<P> AsyncWriteJournal<P> for InMemoryJournal<P>
where
    P: Clone + Send + Sync + 'static,
{
    async fn write_messages(
        &self,
        batches: Vec<AtomicWrite<P>>,
    ) -> Result<Vec<WriteOutcome>, JournalError> {
        self.ensure_online()?;
        let mut outcomes = Vec::with_capacity(batches.len());
        for batch in batches {
            outcomes.push(self.write_one(batch).await);
        }
        Ok(outcomes)
    }

    async fn delete_messages_to(
        &self,
        entity_id: &str,
        to_sequence_nr: SequenceNr,
    ) -> Result<(), JournalError> {
        self.ensure_online()?;
        if self.delete_mode == DeleteMode::Retain {
            tracing::debug!(entity_id, to_sequence_nr, "delete acknowledged, records retained");
            return Ok(());
        }

        let mut guard = self.logs.write().await;
        let removed = guard
            .get_mut(entity_id)
            .map(|log| log.delete_to(to_sequence_nr))
            .unwrap_or(0);
        drop(guard);

        tracing::debug!(entity_id, to_sequence_nr, removed, "messages deleted");
        Ok(())
    }

    async fn replay_messages(
        &self,
        entity_id: &str,
        from_sequence_nr: SequenceNr,
        to_sequence_nr: SequenceNr,
        max: u64,
        callback: &mut (dyn FnMut(PersistentRepr<P>) + Send),
    ) -> Result<(), JournalError> {
        self.ensure_online()?;
        let range = SequenceRange::new(from_sequence_nr, to_sequence_nr);
        let replayed: Vec<JournalRecord<P>> = {
            let guard = self.logs.read().await;
            guard
                .get(entity_id)
                .map(|log| log.replay(range, max).into_iter().cloned().collect())
                .unwrap_or_default()
        };

        tracing::debug!(
            entity_id,
            from_sequence_nr,
            to_sequence_nr,
            max,
            count = replayed.len(),
            "replaying messages"
        );
        let entity = EntityId::from(entity_id);
        for record in replayed {
            callback(PersistentRepr::from_record(entity.clone(), record));
        }
        Ok(())
    }

    async fn read_highest_sequence_nr(
        &self,
        entity_id: &str,
        from_sequence_nr: SequenceNr,
    ) -> Result<SequenceNr, JournalError> {
        self.ensure_online()?;
        let highest = self
            .logs
            .read()
            .await
            .get(entity_id)
            .map(|log| log.highest_at_or_above(from_sequence_nr))
            .unwrap_or(0);
        tracing::debug!(entity_id, from_sequence_nr, highest, "highest sequence nr read");
        Ok(highest)
    }
}
