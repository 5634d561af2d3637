// Ordered, sequence-numbered record log for one entity.
//
// Responsibilities
// - Keep records in arrival order, whatever their sequence numbers.
// - Answer the queries the journal needs: newest first, oldest first, the highest
//   sequence number at or above a floor, and a bounded replay range.
//
// Invariants
// - Sequence numbers are assigned by the host. The log neither checks uniqueness
//   nor monotonicity.
// - Records are never mutated. Only `delete_to` removes them, and the log then
//   remembers the highest sequence number it removed.

use super::record::JournalRecord;
use crate::shared::core::primitives::{SequenceNr, SequenceRange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalLog<P> {
    records: Vec<JournalRecord<P>>,
    highest_deleted: Option<SequenceNr>,
}

impl<P> Default for JournalLog<P> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            highest_deleted: None,
        }
    }
}

impl<P> JournalLog<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: JournalRecord<P>) {
        self.records.push(record);
    }

    /// Records in arrival order.
    pub fn records(&self) -> &[JournalRecord<P>] {
        &self.records
    }

    /// All records sorted by sequence number, largest first.
    pub fn get_ordered(&self) -> Vec<&JournalRecord<P>> {
        let mut ordered: Vec<&JournalRecord<P>> = self.records.iter().collect();
        ordered.sort_by(|a, b| b.sequence_nr.cmp(&a.sequence_nr));
        ordered
    }

    /// All records sorted by sequence number, smallest first. Stable, so equal
    /// sequence numbers keep their arrival order.
    pub fn ascending(&self) -> Vec<&JournalRecord<P>> {
        let mut ordered: Vec<&JournalRecord<P>> = self.records.iter().collect();
        ordered.sort_by_key(|record| record.sequence_nr);
        ordered
    }

    /// Largest sequence number `>= floor`, including numbers already truncated,
    /// or 0 when there is none.
    pub fn highest_at_or_above(&self, floor: SequenceNr) -> SequenceNr {
        let deleted = self.highest_deleted.filter(|highest| *highest >= floor);
        self.records
            .iter()
            .map(|record| record.sequence_nr)
            .filter(|sequence_nr| *sequence_nr >= floor)
            .fold(deleted, |highest, sequence_nr| {
                Some(highest.map_or(sequence_nr, |h| h.max(sequence_nr)))
            })
            .unwrap_or(0)
    }

    /// Up to `max` records inside `range`, oldest first.
    pub fn replay(&self, range: SequenceRange, max: u64) -> Vec<&JournalRecord<P>> {
        let cap = usize::try_from(max).unwrap_or(usize::MAX);
        self.ascending()
            .into_iter()
            .filter(|record| range.contains(record.sequence_nr))
            .take(cap)
            .collect()
    }

    /// Remove every record with a sequence number `<= bound`. Returns how many went.
    pub fn delete_to(&mut self, bound: SequenceNr) -> usize {
        let before = self.records.len();
        let mut highest_deleted = self.highest_deleted;
        self.records.retain(|record| {
            if record.sequence_nr <= bound {
                highest_deleted = Some(
                    highest_deleted.map_or(record.sequence_nr, |h| h.max(record.sequence_nr)),
                );
                false
            } else {
                true
            }
        });
        self.highest_deleted = highest_deleted;
        before - self.records.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod journal_log_tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn sequence_nrs(records: Vec<&JournalRecord<&'static str>>) -> Vec<SequenceNr> {
        records.iter().map(|record| record.sequence_nr).collect()
    }

    #[fixture]
    fn before_each() -> JournalLog<&'static str> {
        let mut log = JournalLog::new();
        log.add(JournalRecord::new(3, "three"));
        log.add(JournalRecord::new(1, "one"));
        log.add(JournalRecord::new(5, "five"));
        log
    }

    #[rstest]
    fn it_should_keep_arrival_order(before_each: JournalLog<&'static str>) {
        let log = before_each;
        let arrival: Vec<_> = log.records().iter().map(|r| r.payload).collect();
        assert_eq!(arrival, vec!["three", "one", "five"]);
        assert_eq!(log.len(), 3);
    }

    #[rstest]
    fn it_should_order_largest_first(before_each: JournalLog<&'static str>) {
        assert_eq!(sequence_nrs(before_each.get_ordered()), vec![5, 3, 1]);
    }

    #[rstest]
    fn it_should_order_smallest_first(before_each: JournalLog<&'static str>) {
        assert_eq!(sequence_nrs(before_each.ascending()), vec![1, 3, 5]);
    }

    #[rstest]
    #[case(0, 5)]
    #[case(4, 5)]
    #[case(5, 5)]
    #[case(6, 0)]
    fn it_should_find_the_highest_at_or_above_the_floor(
        before_each: JournalLog<&'static str>,
        #[case] floor: SequenceNr,
        #[case] expected: SequenceNr,
    ) {
        assert_eq!(before_each.highest_at_or_above(floor), expected);
    }

    #[rstest]
    fn it_should_agree_with_the_descending_idiom(before_each: JournalLog<&'static str>) {
        for floor in -1..=7 {
            let via_sort = before_each
                .get_ordered()
                .into_iter()
                .find(|record| record.sequence_nr >= floor)
                .map(|record| record.sequence_nr)
                .unwrap_or(0);
            assert_eq!(before_each.highest_at_or_above(floor), via_sort);
        }
    }

    #[rstest]
    fn it_should_replay_a_capped_range_oldest_first(before_each: JournalLog<&'static str>) {
        let log = before_each;
        assert_eq!(sequence_nrs(log.replay(SequenceRange::new(1, 5), 2)), vec![1, 3]);
        assert_eq!(sequence_nrs(log.replay(SequenceRange::new(2, 5), 10)), vec![3, 5]);
        assert!(log.replay(SequenceRange::new(1, 5), 0).is_empty());
        assert!(log.replay(SequenceRange::new(5, 1), 10).is_empty());
    }

    #[rstest]
    fn it_should_delete_up_to_the_bound_and_remember_the_highest(
        before_each: JournalLog<&'static str>,
    ) {
        let mut log = before_each;
        assert_eq!(log.delete_to(3), 2);
        assert_eq!(sequence_nrs(log.ascending()), vec![5]);

        assert_eq!(log.delete_to(10), 1);
        assert!(log.is_empty());
        assert_eq!(log.highest_at_or_above(0), 5);
        assert_eq!(log.highest_at_or_above(6), 0);
    }

    #[rstest]
    fn it_should_keep_duplicate_sequence_nrs_in_arrival_order() {
        let mut log = JournalLog::new();
        log.add(JournalRecord::new(2, "first"));
        log.add(JournalRecord::new(1, "zero"));
        log.add(JournalRecord::new(2, "second"));
        let payloads: Vec<_> = log.ascending().iter().map(|r| r.payload).collect();
        assert_eq!(payloads, vec!["zero", "first", "second"]);
    }
}
