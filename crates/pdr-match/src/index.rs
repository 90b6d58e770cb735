//! Lookup structures over a resolved batch: the license index the tiers
//! probe, and the name/zip/degree search the corroboration tiers use.

use std::collections::{BTreeMap, BTreeSet};

use pdr_model::{CanonicalId, CanonicalIdentity};
use pdr_vocab::Vocabulary;

/// License number → sub-code → canonical id set.
///
/// Entries without a sub-code are weaker evidence: the number alone does not
/// say which profession the license covers.
#[derive(Debug, Default)]
pub struct LicenseIndex {
    entries: BTreeMap<String, BTreeMap<Option<String>, BTreeSet<CanonicalId>>>,
}

impl LicenseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a resolved batch. Identities carry bare numbers; sub-codes are
    /// only learned later from authority data, via [`insert`](Self::insert).
    pub fn from_identities(identities: &[CanonicalIdentity]) -> Self {
        let mut index = Self::new();
        for identity in identities {
            for number in &identity.candidate.license_numbers {
                index.insert(number.clone(), None, identity.canonical_id);
            }
        }
        index
    }

    pub fn insert(&mut self, number: String, sub_code: Option<String>, id: CanonicalId) {
        self.entries
            .entry(number)
            .or_default()
            .entry(sub_code)
            .or_default()
            .insert(id);
    }

    /// Ids holding this exact number under this exact sub-code.
    pub fn full_matches(&self, number: &str, sub_code: &str) -> BTreeSet<CanonicalId> {
        self.entries
            .get(number)
            .and_then(|subs| subs.get(&Some(sub_code.to_string())))
            .cloned()
            .unwrap_or_default()
    }

    /// Ids holding this number with no sub-code on record.
    pub fn number_only_matches(&self, number: &str) -> BTreeSet<CanonicalId> {
        self.entries
            .get(number)
            .and_then(|subs| subs.get(&None))
            .cloned()
            .unwrap_or_default()
    }

    /// Ids holding this number under any sub-code.
    pub fn any_matches(&self, number: &str) -> BTreeSet<CanonicalId> {
        self.entries
            .get(number)
            .map(|subs| subs.values().flatten().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Name-keyed search over a resolved batch, used by the corroboration tiers.
pub trait NameSearch {
    /// Ids whose surname matches and who have an address in this zip.
    fn search_name_zip(&self, last_name: &str, zip: &str) -> BTreeSet<CanonicalId>;

    /// Ids whose surname matches and who hold a qualifying doctoral degree.
    fn search_degree_name(&self, last_name: &str) -> BTreeSet<CanonicalId>;
}

/// In-memory [`NameSearch`] built from the resolved batch itself.
#[derive(Debug, Default)]
pub struct IdentitySearch {
    by_name_zip: BTreeMap<(String, String), BTreeSet<CanonicalId>>,
    doctoral_by_name: BTreeMap<String, BTreeSet<CanonicalId>>,
}

impl IdentitySearch {
    pub fn build(identities: &[CanonicalIdentity], vocab: &Vocabulary) -> Self {
        let qualifying = vocab.qualifying_doctoral_degrees();
        let mut search = Self::default();

        for identity in identities {
            let last = identity.candidate.last_name.clone();
            for zip in &identity.candidate.zip_codes {
                search
                    .by_name_zip
                    .entry((last.clone(), zip.clone()))
                    .or_default()
                    .insert(identity.canonical_id);
            }

            let doctoral = identity.candidate.credentials.iter().any(|parse| {
                parse
                    .valid_degrees
                    .iter()
                    .any(|degree| qualifying.contains(degree.as_str()))
            });
            if doctoral {
                search
                    .doctoral_by_name
                    .entry(last)
                    .or_default()
                    .insert(identity.canonical_id);
            }
        }
        search
    }
}

impl NameSearch for IdentitySearch {
    fn search_name_zip(&self, last_name: &str, zip: &str) -> BTreeSet<CanonicalId> {
        self.by_name_zip
            .get(&(last_name.to_string(), zip.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn search_degree_name(&self, last_name: &str) -> BTreeSet<CanonicalId> {
        self.doctoral_by_name
            .get(last_name)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdr_model::IdentityCandidate;

    fn identity(id: CanonicalId, last: &str, license: Option<&str>, zip: Option<&str>) -> CanonicalIdentity {
        let mut candidate = IdentityCandidate::new(id * 10, "jane".into(), last.into());
        if let Some(number) = license {
            candidate.license_numbers.insert(number.to_string());
        }
        if let Some(zip) = zip {
            candidate.zip_codes.insert(zip.to_string());
        }
        CanonicalIdentity {
            canonical_id: id,
            candidate,
        }
    }

    #[test]
    fn batch_index_entries_have_no_sub_code() {
        let identities = vec![identity(1, "smith", Some("054812"), None)];
        let index = LicenseIndex::from_identities(&identities);
        assert!(index.full_matches("054812", "68").is_empty());
        assert_eq!(index.number_only_matches("054812").len(), 1);
        assert_eq!(index.any_matches("054812").len(), 1);
    }

    #[test]
    fn sub_code_entries_only_answer_full_lookups() {
        let mut index = LicenseIndex::new();
        index.insert("054812".into(), Some("68".into()), 3);
        assert_eq!(index.full_matches("054812", "68").len(), 1);
        assert!(index.number_only_matches("054812").is_empty());
    }

    #[test]
    fn name_zip_search_hits_only_matching_zip() {
        let vocab = Vocabulary::load().expect("vocabulary must load");
        let identities = vec![
            identity(1, "smith", None, Some("10001")),
            identity(2, "smith", None, Some("10002")),
        ];
        let search = IdentitySearch::build(&identities, &vocab);
        let hits = search.search_name_zip("smith", "10001");
        assert_eq!(hits.into_iter().collect::<Vec<_>>(), vec![1]);
        assert!(search.search_name_zip("jones", "10001").is_empty());
    }

    #[test]
    fn degree_search_requires_qualifying_degree() {
        let vocab = Vocabulary::load().expect("vocabulary must load");
        let mut with_phd = identity(1, "smith", None, None);
        let mut parse = pdr_model::CredentialParse::default();
        parse.valid_degrees.insert("phd".into());
        with_phd.candidate.credentials.push(parse);
        let without = identity(2, "smith", None, None);

        let search = IdentitySearch::build(&[with_phd, without], &vocab);
        let hits = search.search_degree_name("smith");
        assert_eq!(hits.into_iter().collect::<Vec<_>>(), vec![1]);
    }
}
