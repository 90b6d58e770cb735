use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::credential::CredentialParse;
use crate::record::RowId;

/// Stable integer identity assigned after resolution converges. Positive;
/// assignment starts at 1.
pub type CanonicalId = i64;

/// A provisional person: the mutable aggregate built by merging raw rows
/// believed to describe the same human.
///
/// Candidates are owned exclusively by the resolver during a pass; merging
/// consumes the other candidate, so a row id can never live in two candidates
/// at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityCandidate {
    /// Normalized surname. Required; bucket key during resolution.
    pub last_name: String,
    /// Normalized first name of the first contributing row that had one.
    pub first_name: String,
    /// Contributing raw-record ids. Never empty.
    pub row_ids: BTreeSet<RowId>,
    /// Source directories the contributing rows came from.
    pub directory_ids: BTreeSet<String>,
    /// Postal codes derived from contributing addresses.
    pub zip_codes: BTreeSet<String>,
    /// Normalized state license numbers.
    pub license_numbers: BTreeSet<String>,
    /// Board certificate numbers.
    pub certificate_numbers: BTreeSet<String>,
    /// `first_name+last_name` keys seen across merges; survives surname
    /// variants because it is keyed on both names together.
    pub full_name_keys: BTreeSet<String>,
    /// Short prefixes of contributing first names. Weak signal.
    pub first_initial_prefixes: BTreeSet<String>,
    /// Credential parses contributed by the merged rows.
    pub credentials: Vec<CredentialParse>,
}

impl IdentityCandidate {
    /// Start a candidate from a single row's normalized fields.
    pub fn new(row_id: RowId, first_name: String, last_name: String) -> Self {
        let mut row_ids = BTreeSet::new();
        row_ids.insert(row_id);

        let mut full_name_keys = BTreeSet::new();
        let mut first_initial_prefixes = BTreeSet::new();
        if !first_name.is_empty() {
            full_name_keys.insert(format!("{first_name}{last_name}"));
            first_initial_prefixes.insert(first_name.chars().take(1).collect());
            first_initial_prefixes.insert(first_name.chars().take(3).collect());
        }

        Self {
            last_name,
            first_name,
            row_ids,
            directory_ids: BTreeSet::new(),
            zip_codes: BTreeSet::new(),
            license_numbers: BTreeSet::new(),
            certificate_numbers: BTreeSet::new(),
            full_name_keys,
            first_initial_prefixes,
            credentials: Vec::new(),
        }
    }

    /// Merge `other` into this candidate, unioning every set field. The
    /// first name is kept from whichever candidate supplied one first.
    pub fn merge(&mut self, other: IdentityCandidate) {
        if self.first_name.is_empty() && !other.first_name.is_empty() {
            self.first_name = other.first_name;
        }
        self.row_ids.extend(other.row_ids);
        self.directory_ids.extend(other.directory_ids);
        self.zip_codes.extend(other.zip_codes);
        self.license_numbers.extend(other.license_numbers);
        self.certificate_numbers.extend(other.certificate_numbers);
        self.full_name_keys.extend(other.full_name_keys);
        self.first_initial_prefixes
            .extend(other.first_initial_prefixes);
        self.credentials.extend(other.credentials);
    }

    /// Whether any credential parse on `self` matches any on `other` under
    /// the credential deduplication heuristic.
    pub fn credentials_overlap(&self, other: &IdentityCandidate) -> bool {
        self.credentials
            .iter()
            .any(|a| other.credentials.iter().any(|b| a.deduplicate(b)))
    }
}

/// The terminal form of a candidate after convergence: the same aggregate
/// plus its assigned canonical id.
///
/// The union of `row_ids` across all canonical identities of a run partitions
/// the input row-id space with no overlaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalIdentity {
    pub canonical_id: CanonicalId,
    #[serde(flatten)]
    pub candidate: IdentityCandidate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_unions_sets_and_keeps_first_name() {
        let mut a = IdentityCandidate::new(1, String::new(), "smith".into());
        a.certificate_numbers.insert("123".into());

        let mut b = IdentityCandidate::new(2, "jane".into(), "smith".into());
        b.zip_codes.insert("10001".into());

        a.merge(b);
        assert_eq!(a.first_name, "jane");
        assert_eq!(a.row_ids.len(), 2);
        assert!(a.zip_codes.contains("10001"));
        assert!(a.certificate_numbers.contains("123"));
        assert!(a.full_name_keys.contains("janesmith"));
    }

    #[test]
    fn new_candidate_records_name_prefixes() {
        let candidate = IdentityCandidate::new(7, "jane".into(), "smith".into());
        assert!(candidate.first_initial_prefixes.contains("j"));
        assert!(candidate.first_initial_prefixes.contains("jan"));

        let initial_only = IdentityCandidate::new(8, "j".into(), "smith".into());
        assert!(
            !candidate
                .first_initial_prefixes
                .is_disjoint(&initial_only.first_initial_prefixes)
        );
    }
}
