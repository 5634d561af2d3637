// Ordered collection of identified snapshot values for one entity.
//
// Invariants
// - Records keep insertion order.
// - Ids are not unique. `delete` removes every record carrying the id, and
//   `delete_where` removes by value, so records sharing an id can part ways.

use crate::shared::core::primitives::PersistedState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord<V> {
    pub id: i64,
    pub value: V,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stash<V: PersistedState> {
    records: Vec<SnapshotRecord<V>>,
}

impl<V: PersistedState> Default for Stash<V> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<V: PersistedState> Stash<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: i64, value: V) {
        self.records.push(SnapshotRecord { id, value });
    }

    /// Remove every record with `id`. Returns how many were removed.
    pub fn delete(&mut self, id: i64) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        before - self.records.len()
    }

    /// Remove every record whose value satisfies `predicate`, whatever its id.
    pub fn delete_where(&mut self, predicate: impl Fn(&V) -> bool) -> usize {
        let before = self.records.len();
        self.records.retain(|record| !predicate(&record.value));
        before - self.records.len()
    }

    /// Values satisfying `predicate`, in insertion order.
    pub fn select(&self, predicate: impl Fn(&V) -> bool) -> Vec<&V> {
        self.records
            .iter()
            .filter(|record| predicate(&record.value))
            .map(|record| &record.value)
            .collect()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.records.iter().map(|record| record.id).collect()
    }

    pub fn records(&self) -> &[SnapshotRecord<V>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
