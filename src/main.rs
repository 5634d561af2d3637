use persistence_inmem::modules::journal::core::record::{AtomicWrite, PersistentRepr};
use persistence_inmem::modules::journal::ports::AsyncWriteJournal;
use persistence_inmem::modules::snapshots::core::selection::{
    SnapshotMetadata, SnapshotSelectionCriteria,
};
use persistence_inmem::modules::snapshots::ports::SnapshotStore;
use persistence_inmem::shared::config::PersistenceConfig;
use persistence_inmem::shared::telemetry;
use persistence_inmem::shell::InMemoryPersistence;
use serde_json::{Value, json};

const ENTITY: &str = "counter-1";

// Smoke run: journal a few events, snapshot, then recover the way a host would.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PersistenceConfig::from_env()?;
    telemetry::init(&config.log_filter);

    let persistence = InMemoryPersistence::<Value, Value>::new(config);
    let journal = persistence.journal();
    let snapshots = persistence.snapshots();

    let batches = vec![
        AtomicWrite::new(vec![
            PersistentRepr::new(ENTITY, 1, json!({ "incremented": 1 })),
            PersistentRepr::new(ENTITY, 2, json!({ "incremented": 2 })),
        ]),
        AtomicWrite::single(PersistentRepr::new(ENTITY, 3, json!({ "incremented": 4 }))),
    ];
    for outcome in journal.write_messages(batches).await? {
        outcome?;
    }
    snapshots
        .save(SnapshotMetadata::new(ENTITY, 2), json!({ "total": 3 }))
        .await?;

    let snapshot = snapshots
        .load(ENTITY, SnapshotSelectionCriteria::latest())
        .await?;
    let from_sequence_nr = snapshot
        .as_ref()
        .map(|s| s.metadata.sequence_nr + 1)
        .unwrap_or(1);
    let highest = journal
        .read_highest_sequence_nr(ENTITY, from_sequence_nr)
        .await?;

    let mut total = snapshot
        .as_ref()
        .and_then(|s| s.snapshot["total"].as_i64())
        .unwrap_or(0);
    journal
        .replay_messages(ENTITY, from_sequence_nr, highest, u64::MAX, &mut |repr| {
            total += repr.payload["incremented"].as_i64().unwrap_or(0);
        })
        .await?;
    tracing::info!(entity = ENTITY, highest, total, "recovered");

    persistence.shutdown().await;
    Ok(())
}
