//! Canonical id assignment. Ids are dense and monotonic within a run; the
//! row map built alongside is the authoritative row→identity index.

use tracing::error;

use pdr_model::{CanonicalIdentity, IdentityCandidate, RowMap};

/// Assign canonical ids `1..=n` to merged candidates, in order, and build
/// the row map from every contributing row id.
///
/// A row claimed by two candidates means resolution failed its partition
/// invariant; the map keeps the first claim and the fault is logged loudly
/// rather than papered over.
pub fn assign(candidates: Vec<IdentityCandidate>) -> (Vec<CanonicalIdentity>, RowMap) {
    let mut map = RowMap::new();
    let mut identities = Vec::with_capacity(candidates.len());

    for (offset, candidate) in candidates.into_iter().enumerate() {
        let canonical_id = offset as i64 + 1;
        for row_id in &candidate.row_ids {
            map.insert(*row_id, canonical_id);
        }
        identities.push(CanonicalIdentity {
            canonical_id,
            candidate,
        });
    }

    for fault in map.faults() {
        error!(
            row_id = fault.row_id,
            existing = fault.existing,
            rejected = fault.rejected,
            "row claimed by two canonical identities"
        );
    }

    (identities, map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(rows: &[i64]) -> IdentityCandidate {
        let mut c = IdentityCandidate::new(rows[0], "jane".into(), "smith".into());
        for row in &rows[1..] {
            c.row_ids.insert(*row);
        }
        c
    }

    #[test]
    fn ids_are_dense_and_monotonic() {
        let (identities, map) = assign(vec![candidate(&[10]), candidate(&[20, 21]), candidate(&[5])]);
        let ids: Vec<i64> = identities.iter().map(|i| i.canonical_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(map.get(20), Some(2));
        assert_eq!(map.get(21), Some(2));
        assert_eq!(map.len(), 4);
        assert!(map.faults().is_empty());
    }

    #[test]
    fn double_claimed_row_keeps_first_and_faults() {
        let (_, map) = assign(vec![candidate(&[1, 2]), candidate(&[2, 3])]);
        assert_eq!(map.get(2), Some(1));
        assert_eq!(map.faults().len(), 1);
        assert_eq!(map.faults()[0].rejected, 2);
    }
}
