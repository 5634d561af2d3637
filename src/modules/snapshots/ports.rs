// Ports define what a persistent actor host needs from a snapshot backend.
//
// Conventions
// - An entity with no snapshot loads as None, never as an error.

use crate::modules::snapshots::core::selection::{
    SelectedSnapshot, SnapshotMetadata, SnapshotSelectionCriteria,
};
use crate::shared::core::primitives::PersistedState;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait SnapshotStore<S: PersistedState>: Send + Sync {
    /// The youngest snapshot matching `criteria`.
    async fn load(
        &self,
        entity_id: &str,
        criteria: SnapshotSelectionCriteria,
    ) -> Result<Option<SelectedSnapshot<S>>, SnapshotError>;

    /// Store `snapshot`, replacing one already saved at the same sequence number.
    async fn save(&self, metadata: SnapshotMetadata, snapshot: S) -> Result<(), SnapshotError>;

    async fn delete(&self, metadata: &SnapshotMetadata) -> Result<(), SnapshotError>;

    async fn delete_matching(
        &self,
        entity_id: &str,
        criteria: SnapshotSelectionCriteria,
    ) -> Result<(), SnapshotError>;
}
