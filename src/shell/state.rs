use crate::modules::journal::adapters::in_memory::InMemoryJournal;
use crate::modules::snapshots::adapters::in_memory::InMemorySnapshotStore;
use crate::shared::config::PersistenceConfig;
use crate::shared::core::primitives::PersistedState;

/// Owns one journal and one snapshot store for the lifetime of a test run.
///
/// Both stores are handles over shared state: clone them into as many consumers
/// as needed. `shutdown` empties the shared state for every handle.
pub struct InMemoryPersistence<P, S>
where
    P: Clone + Send + Sync + 'static,
    S: PersistedState,
{
    config: PersistenceConfig,
    journal: InMemoryJournal<P>,
    snapshots: InMemorySnapshotStore<S>,
}

impl<P, S> InMemoryPersistence<P, S>
where
    P: Clone + Send + Sync + 'static,
    S: PersistedState,
{
    pub fn new(config: PersistenceConfig) -> Self {
        let journal = InMemoryJournal::with_delete_mode(config.delete_mode);
        let snapshots = InMemorySnapshotStore::new();
        tracing::info!(
            journal = %config.journal_plugin_id,
            snapshots = %config.snapshot_plugin_id,
            delete_mode = ?config.delete_mode,
            "in-memory persistence started"
        );
        Self {
            config,
            journal,
            snapshots,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(PersistenceConfig::from_env()?))
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    pub fn journal(&self) -> InMemoryJournal<P> {
        self.journal.clone()
    }

    pub fn snapshots(&self) -> InMemorySnapshotStore<S> {
        self.snapshots.clone()
    }

    /// Drop all journaled events and snapshots.
    pub async fn shutdown(self) {
        let journal_entities = self.journal.clear().await;
        let snapshot_entities = self.snapshots.clear().await;
        tracing::info!(
            journal = %self.config.journal_plugin_id,
            journal_entities,
            snapshot_entities,
            "in-memory persistence shut down"
        );
    }
}
