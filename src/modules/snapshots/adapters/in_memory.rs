// In memory implementation of the SnapshotStore port.
//
// Responsibilities
// - Keep one Stash per entity, created on first add and never removed.
// - Guard every stash behind one lock over the whole map.
// - The stash id of a snapshot is its sequence number.

use crate::modules::snapshots::core::selection::{
    SelectedSnapshot, SnapshotMetadata, SnapshotSelectionCriteria,
};
use crate::modules::snapshots::core::stash::Stash;
use crate::modules::snapshots::ports::{SnapshotError, SnapshotStore};
use crate::shared::core::primitives::{EntityId, PersistedState};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

type Stashes<S> = HashMap<EntityId, Stash<SelectedSnapshot<S>>>;

pub struct InMemorySnapshotStore<S: PersistedState> {
    stashes: Arc<RwLock<Stashes<S>>>,
    is_offline: Arc<AtomicBool>,
}

impl<S: PersistedState> Clone for InMemorySnapshotStore<S> {
    fn clone(&self) -> Self {
        Self {
            stashes: Arc::clone(&self.stashes),
            is_offline: Arc::clone(&self.is_offline),
        }
    }
}

impl<S: PersistedState> Default for InMemorySnapshotStore<S> {
    fn default() -> Self {
        Self {
            stashes: Arc::new(RwLock::new(HashMap::new())),
            is_offline: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<S: PersistedState> InMemorySnapshotStore<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// Append to the entity's stash, creating it when absent. Duplicate ids are kept.
    pub async fn add(&self, entity_id: impl Into<EntityId>, id: i64, value: SelectedSnapshot<S>) {
        let mut guard = self.stashes.write().await;
        guard.entry(entity_id.into()).or_default().add(id, value);
    }

    /// A copy of the entity's stash, or None when nothing was ever added for it.
    pub async fn get(&self, entity_id: &str) -> Option<Stash<SelectedSnapshot<S>>> {
        self.stashes.read().await.get(entity_id).cloned()
    }

    pub async fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.stashes.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn clear(&self) -> usize {
        let mut guard = self.stashes.write().await;
        let count = guard.len();
        guard.clear();
        count
    }

    fn ensure_online(&self) -> Result<(), SnapshotError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(SnapshotError::Backend("snapshot store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<S: PersistedState> SnapshotStore<S> for InMemorySnapshotStore<S> {
    async fn load(
        &self,
        entity_id: &str,
        criteria: SnapshotSelectionCriteria,
    ) -> Result<Option<SelectedSnapshot<S>>, SnapshotError> {
        self.ensure_online()?;
        let guard = self.stashes.read().await;
        let selected = guard.get(entity_id).and_then(|stash| {
            stash
                .select(|candidate| criteria.matches(&candidate.metadata))
                .into_iter()
                .max_by_key(|candidate| (candidate.metadata.sequence_nr, candidate.metadata.timestamp))
                .cloned()
        });
        tracing::debug!(
            entity_id,
            found = ?selected.as_ref().map(|s| s.metadata.sequence_nr),
            "snapshot loaded"
        );
        Ok(selected)
    }

    async fn save(&self, metadata: SnapshotMetadata, snapshot: S) -> Result<(), SnapshotError> {
        self.ensure_online()?;
        let sequence_nr = metadata.sequence_nr;
        let entity_id = metadata.entity_id.clone();

        let mut guard = self.stashes.write().await;
        let stash = guard.entry(entity_id.clone()).or_default();
        let replaced = stash.delete(sequence_nr);
        stash.add(sequence_nr, SelectedSnapshot { metadata, snapshot });
        drop(guard);

        tracing::debug!(%entity_id, sequence_nr, replaced, "snapshot saved");
        Ok(())
    }

    async fn delete(&self, metadata: &SnapshotMetadata) -> Result<(), SnapshotError> {
        self.ensure_online()?;
        let removed = self
            .stashes
            .write()
            .await
            .get_mut(metadata.entity_id.as_str())
            .map(|stash| stash.delete(metadata.sequence_nr))
            .unwrap_or(0);
        tracing::debug!(
            entity_id = %metadata.entity_id,
            sequence_nr = metadata.sequence_nr,
            removed,
            "snapshot deleted"
        );
        Ok(())
    }

    async fn delete_matching(
        &self,
        entity_id: &str,
        criteria: SnapshotSelectionCriteria,
    ) -> Result<(), SnapshotError> {
        self.ensure_online()?;
        let mut guard = self.stashes.write().await;
        let Some(stash) = guard.get_mut(entity_id) else {
            return Ok(());
        };
        let removed = stash.delete_where(|candidate| criteria.matches(&candidate.metadata));
        drop(guard);

        tracing::debug!(entity_id, removed, "snapshots deleted by criteria");
        Ok(())
    }
}
