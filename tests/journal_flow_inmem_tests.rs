// End to end in memory tests for the journal contract a persistent actor host relies on.

use persistence_inmem::modules::journal::adapters::in_memory::InMemoryJournal;
use persistence_inmem::modules::journal::core::record::{AtomicWrite, PersistentRepr};
use persistence_inmem::modules::journal::ports::{AsyncWriteJournal, JournalError};
use persistence_inmem::shared::core::primitives::SequenceNr;
use rstest::{fixture, rstest};

#[derive(Debug, Clone, PartialEq, Eq)]
enum CounterEvent {
    Incremented(i64),
}

fn write(entity_id: &str, sequence_nrs: &[SequenceNr]) -> AtomicWrite<CounterEvent> {
    AtomicWrite::new(
        sequence_nrs
            .iter()
            .map(|nr| PersistentRepr::new(entity_id, *nr, CounterEvent::Incremented(*nr)))
            .collect(),
    )
}

#[fixture]
fn journal() -> InMemoryJournal<CounterEvent> {
    InMemoryJournal::new()
}

#[rstest]
#[tokio::test]
async fn reports_the_highest_sequence_nr_for_out_of_order_writes(
    journal: InMemoryJournal<CounterEvent>,
) {
    for nr in [3, 1, 5] {
        journal.write_messages(vec![write("A", &[nr])]).await.unwrap();
    }

    assert_eq!(journal.read_highest_sequence_nr("A", 0).await.unwrap(), 5);
    assert_eq!(journal.read_highest_sequence_nr("A", 6).await.unwrap(), 0);
    assert_eq!(journal.read_highest_sequence_nr("B", 0).await.unwrap(), 0);
}

#[rstest]
#[tokio::test]
async fn replays_a_capped_range_in_historical_order(journal: InMemoryJournal<CounterEvent>) {
    journal
        .write_messages(vec![write("A", &[3, 1, 5])])
        .await
        .unwrap();

    let mut replayed = Vec::new();
    journal
        .replay_messages("A", 1, 5, 2, &mut |repr| replayed.push(repr.payload))
        .await
        .unwrap();

    assert_eq!(
        replayed,
        vec![CounterEvent::Incremented(1), CounterEvent::Incremented(3)]
    );
}

#[rstest]
#[tokio::test]
async fn recovers_after_deleting_a_prefix(journal: InMemoryJournal<CounterEvent>) {
    journal
        .write_messages(vec![write("A", &[1, 2, 3, 4])])
        .await
        .unwrap();
    journal.delete_messages_to("A", 2).await.unwrap();

    let highest = journal.read_highest_sequence_nr("A", 1).await.unwrap();
    let mut replayed = Vec::new();
    journal
        .replay_messages("A", 1, highest, u64::MAX, &mut |repr| {
            replayed.push(repr.sequence_nr)
        })
        .await
        .unwrap();

    assert_eq!(highest, 4);
    assert_eq!(replayed, vec![3, 4]);
}

#[rstest]
#[tokio::test]
async fn reports_one_outcome_per_batch(journal: InMemoryJournal<CounterEvent>) {
    let outcomes = journal
        .write_messages(vec![
            write("A", &[1]),
            AtomicWrite::new(vec![
                PersistentRepr::new("A", 2, CounterEvent::Incremented(2)),
                PersistentRepr::new("B", 1, CounterEvent::Incremented(1)),
            ]),
            write("A", &[3]),
        ])
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_ok());
    assert!(matches!(outcomes[1], Err(JournalError::Rejected { .. })));
    assert!(outcomes[2].is_ok());
    assert_eq!(journal.read_highest_sequence_nr("A", 0).await.unwrap(), 3);
    assert_eq!(journal.get("A").await.unwrap().len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn keeps_every_record_from_concurrent_writers(journal: InMemoryJournal<CounterEvent>) {
    const WRITERS: i64 = 16;
    const PER_WRITER: i64 = 25;

    let tasks: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let journal = journal.clone();
            tokio::spawn(async move {
                for i in 0..PER_WRITER {
                    let nr = writer * PER_WRITER + i + 1;
                    journal.write_messages(vec![write("A", &[nr])]).await?;
                }
                Ok::<_, JournalError>(())
            })
        })
        .collect();
    for task in tasks {
        task.await.expect("writer panicked").expect("write failed");
    }

    let log = journal.get("A").await.unwrap();
    assert_eq!(log.len() as i64, WRITERS * PER_WRITER);

    let mut replayed = Vec::new();
    journal
        .replay_messages("A", 0, i64::MAX, u64::MAX, &mut |repr| {
            replayed.push(repr.sequence_nr)
        })
        .await
        .unwrap();
    let expected: Vec<SequenceNr> = (1..=WRITERS * PER_WRITER).collect();
    assert_eq!(replayed, expected);
}
