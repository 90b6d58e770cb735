use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::identity::CanonicalId;
use crate::record::RowId;

/// The persisted row→canonical mapping, rebuilt wholesale on each full
/// resolution run. Downstream enrichment stages treat this as the source of
/// truth for which raw records belong to which person.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowMap {
    entries: BTreeMap<RowId, CanonicalId>,
    /// Row ids that were observed with two different canonical ids. Should be
    /// structurally impossible; a non-empty list marks the run as suspect.
    faults: Vec<RowMapFault>,
}

/// One defensive-check failure: a row id mapped to two canonical ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMapFault {
    pub row_id: RowId,
    pub existing: CanonicalId,
    pub rejected: CanonicalId,
}

impl RowMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `row_id → canonical_id`. A second insert with a different
    /// canonical id is rejected and recorded as a fault; the first mapping
    /// wins and is never silently overwritten.
    pub fn insert(&mut self, row_id: RowId, canonical_id: CanonicalId) -> bool {
        match self.entries.get(&row_id) {
            Some(existing) if *existing != canonical_id => {
                self.faults.push(RowMapFault {
                    row_id,
                    existing: *existing,
                    rejected: canonical_id,
                });
                false
            }
            Some(_) => true,
            None => {
                self.entries.insert(row_id, canonical_id);
                true
            }
        }
    }

    pub fn get(&self, row_id: RowId) -> Option<CanonicalId> {
        self.entries.get(&row_id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn faults(&self) -> &[RowMapFault] {
        &self.faults
    }

    pub fn iter(&self) -> impl Iterator<Item = (RowId, CanonicalId)> + '_ {
        self.entries.iter().map(|(row, id)| (*row, *id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicting_insert_is_a_fault_not_an_overwrite() {
        let mut map = RowMap::new();
        assert!(map.insert(1, 10));
        assert!(map.insert(1, 10));
        assert!(!map.insert(1, 11));

        assert_eq!(map.get(1), Some(10));
        assert_eq!(map.faults().len(), 1);
        assert_eq!(map.faults()[0].rejected, 11);
    }

    #[test]
    fn round_trips_through_json() {
        let mut map = RowMap::new();
        map.insert(4, 2);
        map.insert(9, 1);
        let json = serde_json::to_string(&map).expect("serialize row map");
        let back: RowMap = serde_json::from_str(&json).expect("deserialize row map");
        assert_eq!(back.get(4), Some(2));
        assert_eq!(back.len(), 2);
    }
}
