//! Tiered matching of authority records against a resolved batch, and the
//! enrichment ledger for the identities that match uniquely.
//!
//! Each tier runs only when the previous one found nothing, and a tier only
//! binds on exactly one survivor. More than one survivor means the evidence
//! names two people; binding either would be a guess, so neither is bound.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use tracing::{debug, info, warn};

use pdr_model::CanonicalId;
use pdr_normalize::normalize_name;

use crate::authority::AuthorityRecord;
use crate::index::{LicenseIndex, NameSearch};
use crate::national::NationalRecord;
use crate::report::{
    Enrichment, LicenseAction, LicenseGrant, MatchOutcome, MatchSummary, NationalMatchOutcome,
};

/// Profession code the state assigns to psychologists. The degree tier only
/// makes sense for them: it corroborates via doctoral-psychology degrees.
pub const PSYCHOLOGY_PROFESSION_CODE: u32 = 68;

/// Directory short name recorded on enrichments from the state registry.
pub const AUTHORITY_DIRECTORY: &str = "nysop";

/// Directory short name for the national extract.
pub const NATIONAL_DIRECTORY: &str = "npi";

struct RowState<'r> {
    record: &'r AuthorityRecord,
    full: BTreeSet<CanonicalId>,
    number_only: BTreeSet<CanonicalId>,
    name_zip: BTreeSet<CanonicalId>,
    degree_name: BTreeSet<CanonicalId>,
}

impl RowState<'_> {
    fn matched(&self) -> bool {
        !self.full.is_empty()
            || !self.number_only.is_empty()
            || !self.name_zip.is_empty()
            || !self.degree_name.is_empty()
    }
}

pub struct Matcher<'a> {
    index: &'a LicenseIndex,
    search: &'a dyn NameSearch,
}

impl<'a> Matcher<'a> {
    pub fn new(index: &'a LicenseIndex, search: &'a dyn NameSearch) -> Self {
        Self { index, search }
    }

    /// Match a parsed authority extract against the resolved batch.
    pub fn run(&self, records: &[AuthorityRecord]) -> MatchOutcome {
        let states = self.annotate(records);

        let mut matches: BTreeMap<CanonicalId, usize> = BTreeMap::new();
        let mut ambiguous_identities: BTreeMap<CanonicalId, Vec<String>> = BTreeMap::new();
        let mut ambiguous_records: BTreeMap<String, BTreeSet<CanonicalId>> = BTreeMap::new();
        let mut summary = MatchSummary::new(records.len());

        let mut bind = |pid: CanonicalId, idx: usize| {
            bind_match(
                pid,
                idx,
                records,
                &mut matches,
                &mut ambiguous_identities,
            );
        };

        for (idx, state) in states.iter().enumerate() {
            if !state.matched() {
                summary.unmatched += 1;
                continue;
            }
            let key = state.record.key();

            // Exact license and profession.
            if !state.full.is_empty() {
                if state.full.len() > 1 {
                    ambiguous_records.insert(key, state.full.clone());
                    continue;
                }
                summary.full_license += 1;
                bind(*state.full.iter().next().expect("len is 1"), idx);
                continue;
            }

            // License number corroborated by name evidence.
            let corroborated: BTreeSet<CanonicalId> = state
                .number_only
                .iter()
                .copied()
                .filter(|pid| state.name_zip.contains(pid) || state.degree_name.contains(pid))
                .collect();
            if !corroborated.is_empty() {
                if corroborated.len() > 1 {
                    ambiguous_records.insert(key, corroborated);
                    continue;
                }
                summary.corroborated_license += 1;
                bind(*corroborated.iter().next().expect("len is 1"), idx);
                continue;
            }

            // Name evidence alone, from two independent directions.
            let weak: BTreeSet<CanonicalId> = state
                .name_zip
                .intersection(&state.degree_name)
                .copied()
                .collect();
            match weak.len() {
                0 => {}
                1 => {
                    summary.name_degree += 1;
                    bind(*weak.iter().next().expect("len is 1"), idx);
                }
                _ => {
                    debug!(record = %key, candidates = weak.len(), "weak match set");
                    summary.weak_matches += 1;
                    ambiguous_records.insert(key, weak);
                }
            }
        }

        let (enrichments, double_enrichments) = self.enrich(records, &matches);
        summary.double_enrichments = double_enrichments;
        summary.matched = matches.len();

        let resolution: BTreeMap<String, CanonicalId> = matches
            .iter()
            .map(|(pid, idx)| (records[*idx].key(), *pid))
            .collect();

        info!(
            total = summary.total_records,
            matched = summary.matched,
            ambiguous_records = ambiguous_records.len(),
            ambiguous_identities = ambiguous_identities.len(),
            weak = summary.weak_matches,
            "authority match complete"
        );

        MatchOutcome {
            resolution,
            ambiguous_records,
            ambiguous_identities,
            enrichments,
            summary,
        }
    }

    fn annotate<'r>(&self, records: &'r [AuthorityRecord]) -> Vec<RowState<'r>> {
        records
            .iter()
            .map(|record| {
                let sub_code = record.profession_code.to_string();
                let full = self.index.full_matches(&record.license_number, &sub_code);
                let number_only = self.index.number_only_matches(&record.license_number);

                let mut name_zip = BTreeSet::new();
                let mut degree_name = BTreeSet::new();
                // An exact hit settles it; name evidence is only gathered
                // when the exact tier came up empty.
                if full.is_empty()
                    && let Some(last) = record.last_name()
                {
                    let last = normalize_name(last);
                    if let Some(zip) = &record.zip {
                        name_zip = self.search.search_name_zip(&last, zip);
                    }
                    if record.profession_code == PSYCHOLOGY_PROFESSION_CODE {
                        degree_name = self.search.search_degree_name(&last);
                    }
                }

                RowState {
                    record,
                    full,
                    number_only,
                    name_zip,
                    degree_name,
                }
            })
            .collect()
    }

    fn enrich(
        &self,
        records: &[AuthorityRecord],
        matches: &BTreeMap<CanonicalId, usize>,
    ) -> (Vec<Enrichment>, usize) {
        let mut enriched: BTreeSet<CanonicalId> = BTreeSet::new();
        let mut ledger = Vec::with_capacity(matches.len());
        let mut doubles = 0usize;

        for (&pid, &idx) in matches {
            if !enriched.insert(pid) {
                warn!(canonical_id = pid, record = %records[idx].key(), "double enrichment suppressed");
                doubles += 1;
                continue;
            }
            ledger.push(self.enrichment_for(pid, &records[idx]));
        }
        (ledger, doubles)
    }

    fn enrichment_for(&self, pid: CanonicalId, record: &AuthorityRecord) -> Enrichment {
        let sub_code = record.profession_code.to_string();
        let action = if self
            .index
            .full_matches(&record.license_number, &sub_code)
            .contains(&pid)
        {
            LicenseAction::BackfillGrantDate
        } else if self.index.number_only_matches(&record.license_number).contains(&pid) {
            LicenseAction::UpgradeSubCode
        } else {
            LicenseAction::New
        };

        Enrichment {
            canonical_id: pid,
            record_key: record.key(),
            email: non_empty(&record.email),
            school: non_empty(&record.school),
            year_graduated: record.degree_date.map(|d| d.year()),
            phones: clean_phone_numbers(&record.phone),
            address: record.has_address().then(|| record.get_address()),
            license: LicenseGrant {
                number: record.license_number.clone(),
                sub_code,
                granted: record.license_date.format("%Y-%m-%d").to_string(),
                action,
            },
            directory: AUTHORITY_DIRECTORY.to_string(),
        }
    }
}

/// Match a national extract. License evidence is the only strong signal the
/// extract carries, so only the exact tier applies.
pub fn match_national(records: &[NationalRecord], index: &LicenseIndex) -> NationalMatchOutcome {
    let mut outcome = NationalMatchOutcome::new(records.len());

    for record in records {
        let mut found: BTreeSet<CanonicalId> = BTreeSet::new();
        for number in record.cleaned_license_numbers() {
            found.extend(index.any_matches(&number));
        }
        match found.len() {
            0 => outcome.unmatched += 1,
            1 => {
                let pid = *found.iter().next().expect("len is 1");
                outcome.resolution.insert(record.npi.clone(), pid);
            }
            _ => {
                outcome.ambiguous.insert(record.npi.clone(), found);
            }
        }
    }

    info!(
        total = outcome.total_records,
        matched = outcome.resolution.len(),
        ambiguous = outcome.ambiguous.len(),
        unmatched = outcome.unmatched,
        "national match complete"
    );
    outcome
}

fn bind_match(
    pid: CanonicalId,
    idx: usize,
    records: &[AuthorityRecord],
    matches: &mut BTreeMap<CanonicalId, usize>,
    ambiguous: &mut BTreeMap<CanonicalId, Vec<String>>,
) {
    if let Some(keys) = ambiguous.get_mut(&pid) {
        keys.push(records[idx].key());
        return;
    }
    match matches.get(&pid) {
        Some(&existing) if existing != idx => {
            // Two distinct records claim the same person. Neither claim is
            // trustworthy anymore.
            ambiguous.insert(pid, vec![records[existing].key(), records[idx].key()]);
            matches.remove(&pid);
        }
        Some(_) => {}
        None => {
            matches.insert(pid, idx);
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Pull plausible phone numbers out of a free-text blob. One number per
/// delimiter-separated segment; spaces, parentheses and dashes inside a
/// segment are formatting.
fn clean_phone_numbers(blob: &str) -> Vec<String> {
    blob.split([';', ',', '/'])
        .map(|segment| {
            segment
                .chars()
                .filter(char::is_ascii_digit)
                .collect::<String>()
        })
        .filter(|digits| digits.len() == 10 || digits.len() == 11)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::NameSearch;
    use chrono::NaiveDate;

    #[derive(Default)]
    struct FixedSearch {
        name_zip: BTreeMap<(String, String), BTreeSet<CanonicalId>>,
        degree: BTreeMap<String, BTreeSet<CanonicalId>>,
    }

    impl NameSearch for FixedSearch {
        fn search_name_zip(&self, last_name: &str, zip: &str) -> BTreeSet<CanonicalId> {
            self.name_zip
                .get(&(last_name.to_string(), zip.to_string()))
                .cloned()
                .unwrap_or_default()
        }

        fn search_degree_name(&self, last_name: &str) -> BTreeSet<CanonicalId> {
            self.degree.get(last_name).cloned().unwrap_or_default()
        }
    }

    fn record(code: u32, number: &str, last: &str, zip: Option<&str>) -> AuthorityRecord {
        AuthorityRecord {
            profession_code: code,
            registration_status: "R".into(),
            license_number: number.to_string(),
            names: vec![last.to_string(), "JANE".to_string()],
            address: [String::new(), String::new(), String::new()],
            city: String::new(),
            state: "NY".into(),
            zip: zip.map(str::to_string),
            license_date: NaiveDate::from_ymd_opt(2009, 6, 15).unwrap(),
            degree_date: None,
            school: String::new(),
            email: String::new(),
            phone: String::new(),
        }
    }

    #[test]
    fn exact_tier_binds_unique_match() {
        let mut index = LicenseIndex::new();
        index.insert("054812".into(), Some("68".into()), 1);
        let search = FixedSearch::default();

        let records = vec![record(68, "054812", "SMITH", None)];
        let outcome = Matcher::new(&index, &search).run(&records);

        assert_eq!(outcome.resolution.get(&records[0].key()), Some(&1));
        assert_eq!(outcome.summary.full_license, 1);
        assert_eq!(outcome.enrichments.len(), 1);
        assert_eq!(
            outcome.enrichments[0].license.action,
            LicenseAction::BackfillGrantDate
        );
    }

    #[test]
    fn exact_tier_with_two_survivors_is_ambiguous() {
        let mut index = LicenseIndex::new();
        index.insert("054812".into(), Some("68".into()), 1);
        index.insert("054812".into(), Some("68".into()), 2);
        let search = FixedSearch::default();

        let records = vec![record(68, "054812", "SMITH", None)];
        let outcome = Matcher::new(&index, &search).run(&records);

        assert!(outcome.resolution.is_empty());
        let conflict = outcome.ambiguous_records.get(&records[0].key()).unwrap();
        assert_eq!(conflict.len(), 2);
        assert!(outcome.enrichments.is_empty());
    }

    #[test]
    fn number_only_match_needs_name_corroboration() {
        let mut index = LicenseIndex::new();
        index.insert("054812".into(), None, 1);

        let mut search = FixedSearch::default();
        search
            .name_zip
            .insert(("smith".into(), "10001".into()), BTreeSet::from([1]));

        let records = vec![
            record(60, "054812", "SMITH", Some("10001")),
            record(60, "054812", "JONES", Some("10002")),
        ];
        let outcome = Matcher::new(&index, &search).run(&records);

        assert_eq!(outcome.resolution.get(&records[0].key()), Some(&1));
        assert!(!outcome.resolution.contains_key(&records[1].key()));
        assert_eq!(outcome.summary.corroborated_license, 1);
        assert_eq!(
            outcome.enrichments[0].license.action,
            LicenseAction::UpgradeSubCode
        );
    }

    #[test]
    fn degree_tier_only_applies_to_psychology() {
        let index = LicenseIndex::new();
        let mut search = FixedSearch::default();
        search
            .name_zip
            .insert(("smith".into(), "10001".into()), BTreeSet::from([1]));
        search.degree.insert("smith".into(), BTreeSet::from([1]));

        let psych = vec![record(68, "000001", "SMITH", Some("10001"))];
        let outcome = Matcher::new(&index, &search).run(&psych);
        assert_eq!(outcome.resolution.len(), 1);
        assert_eq!(outcome.summary.name_degree, 1);
        assert_eq!(outcome.enrichments[0].license.action, LicenseAction::New);

        let social_work = vec![record(76, "000001", "SMITH", Some("10001"))];
        let outcome = Matcher::new(&index, &search).run(&social_work);
        assert!(outcome.resolution.is_empty());
    }

    #[test]
    fn weak_tier_multi_survivors_are_ambiguous_and_counted() {
        let index = LicenseIndex::new();
        let mut search = FixedSearch::default();
        search
            .name_zip
            .insert(("smith".into(), "10001".into()), BTreeSet::from([1, 2]));
        search.degree.insert("smith".into(), BTreeSet::from([1, 2]));

        let records = vec![record(68, "000001", "SMITH", Some("10001"))];
        let outcome = Matcher::new(&index, &search).run(&records);

        assert!(outcome.resolution.is_empty());
        assert_eq!(outcome.summary.weak_matches, 1);
        let conflict = outcome.ambiguous_records.get(&records[0].key()).unwrap();
        assert_eq!(conflict.len(), 2);
    }

    #[test]
    fn two_records_claiming_one_identity_go_ambiguous() {
        let mut index = LicenseIndex::new();
        index.insert("054812".into(), Some("68".into()), 1);
        index.insert("054813".into(), Some("68".into()), 1);
        let search = FixedSearch::default();

        let records = vec![
            record(68, "054812", "SMITH", None),
            record(68, "054813", "SMITH", None),
        ];
        let outcome = Matcher::new(&index, &search).run(&records);

        assert!(outcome.resolution.is_empty());
        let keys = outcome.ambiguous_identities.get(&1).unwrap();
        assert_eq!(keys.len(), 2);
        assert!(outcome.enrichments.is_empty());
    }

    #[test]
    fn national_extract_matches_through_license_only() {
        let mut index = LicenseIndex::new();
        index.insert("054812".into(), None, 1);
        index.insert("111111".into(), None, 2);
        index.insert("111111".into(), Some("68".into()), 3);

        let raw = r#"[
            {"npi": "1", "licenses": {"R054812-1": "NY"}},
            {"npi": "2", "licenses": {"111111": "NY"}},
            {"npi": "3", "licenses": {"999999": "NY"}}
        ]"#;
        let records = crate::national::parse_extract(raw).unwrap();
        let outcome = match_national(&records, &index);

        assert_eq!(outcome.resolution.get("1"), Some(&1));
        assert!(outcome.ambiguous.contains_key("2"));
        assert_eq!(outcome.unmatched, 1);
    }

    #[test]
    fn phone_blob_cleanup() {
        assert_eq!(
            clean_phone_numbers("212-555-0100 / (718) 555-0199"),
            vec!["2125550100", "7185550199"]
        );
        assert!(clean_phone_numbers("ext. 44").is_empty());
    }
}
