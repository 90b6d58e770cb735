//! The intra-batch resolver: bucket raw rows by surname, merge candidates
//! under the same-person heuristic, and converge over a configurable number
//! of passes.

use std::collections::BTreeMap;
use std::collections::HashMap;

use tracing::{debug, info};

use pdr_model::{IdentityCandidate, RawRecord};
use pdr_normalize::{CredentialParser, normalize, normalize_name};
use pdr_vocab::Vocabulary;

use crate::report::{ResolutionReport, SkipReason};

/// Zip-by-address lookup, populated upstream by the geocoding stage and
/// consumed here as an opaque table.
pub trait ZipLookup {
    fn lookup_zip(&self, raw_address: &str) -> Option<String>;
}

/// Resolver tuning. The reference behavior is two bucket passes; this is not
/// a guaranteed fixed point, so the count stays configurable for production
/// runs that surface missed merges.
#[derive(Debug, Clone, Copy)]
pub struct ResolveConfig {
    pub passes: usize,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self { passes: 2 }
    }
}

/// The same-person heuristic, evaluated pairwise in a fixed order. First
/// true wins; when in doubt the answer is "different people".
pub fn is_same_person(a: &IdentityCandidate, b: &IdentityCandidate) -> bool {
    // Already merged somewhere along the way.
    if !a.row_ids.is_disjoint(&b.row_ids) {
        return true;
    }

    // A shared first+last key is a strong signal, strong enough to carry
    // across differing surnames, but it still needs corroboration below.
    let name_key_hit = !a.full_name_keys.is_disjoint(&b.full_name_keys);
    if !name_key_hit && a.last_name != b.last_name {
        return false;
    }

    if !a.certificate_numbers.is_disjoint(&b.certificate_numbers) {
        return true;
    }
    if !a.license_numbers.is_disjoint(&b.license_numbers) {
        return true;
    }

    let initials_hit = !a
        .first_initial_prefixes
        .is_disjoint(&b.first_initial_prefixes);
    if name_key_hit || initials_hit {
        if !a.zip_codes.is_disjoint(&b.zip_codes) {
            return true;
        }
        if a.credentials_overlap(b) {
            return true;
        }
    }

    false
}

/// Split a multi-line address blob into individual addresses. Consecutive
/// lines belong to one address; a blank line starts the next one.
pub fn split_addresses(raw: &str) -> Vec<String> {
    let mut addresses = Vec::new();
    let mut current = String::new();
    for line in raw.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                addresses.push(current.trim_end().to_string());
                current.clear();
            }
            continue;
        }
        current.push_str(line);
        current.push(' ');
    }
    if !current.is_empty() {
        addresses.push(current.trim_end().to_string());
    }
    addresses
}

/// Batch resolver over an injected vocabulary and zip lookup.
pub struct Resolver<'a> {
    vocab: &'a Vocabulary,
    zips: &'a dyn ZipLookup,
    config: ResolveConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(vocab: &'a Vocabulary, zips: &'a dyn ZipLookup, config: ResolveConfig) -> Self {
        Self {
            vocab,
            zips,
            config,
        }
    }

    /// Resolve a batch of raw records into merged identity candidates.
    ///
    /// Returned candidates are in stable bucket order, ready for id
    /// assignment. Rows that cannot enter resolution (no surname, no source)
    /// are recorded on the report, never dropped silently.
    pub fn resolve(&self, records: &[RawRecord]) -> (Vec<IdentityCandidate>, ResolutionReport) {
        let mut report = ResolutionReport::new(records.len());
        let parser = CredentialParser::new(self.vocab);

        let mut buckets: BTreeMap<String, Vec<IdentityCandidate>> = BTreeMap::new();
        for record in records {
            match self.candidate_from_record(record, &parser, &mut report) {
                Some(candidate) => buckets
                    .entry(candidate.last_name.clone())
                    .or_default()
                    .push(candidate),
                None => continue,
            }
        }
        info!(
            rows = records.len(),
            buckets = buckets.len(),
            skipped = report.skipped.len(),
            "bucketed raw records"
        );

        // A transitive merge discovered late in one pass (A↔B via
        // certificate, then B↔C via zip+initials) may not have been visible
        // to A if C was processed first; a second full pass catches those.
        for pass in 0..self.config.passes.max(1) {
            let mut merged = 0usize;
            for candidates in buckets.values_mut() {
                let before = candidates.len();
                let converged = converge(std::mem::take(candidates));
                merged += before - converged.len();
                *candidates = converged;
            }
            debug!(pass = pass + 1, merged, "bucket pass complete");
        }

        let candidates = cross_bucket_pass(buckets, &mut report);
        report.candidates = candidates.len();
        info!(candidates = candidates.len(), "resolution converged");
        (candidates, report)
    }

    fn candidate_from_record(
        &self,
        record: &RawRecord,
        parser: &CredentialParser<'_>,
        report: &mut ResolutionReport,
    ) -> Option<IdentityCandidate> {
        let last_name = normalize_name(&record.last_name);
        if last_name.is_empty() {
            report.skip(record.id, SkipReason::NoLastName);
            return None;
        }
        let Some(source_id) = record.source_id() else {
            report.skip(record.id, SkipReason::NoSource);
            return None;
        };

        let first_name = normalize_name(&record.first_name);
        let mut candidate = IdentityCandidate::new(record.id, first_name, last_name);
        candidate.directory_ids.insert(source_id.to_string());

        if let Some(raw) = record.license_number() {
            let license = normalize(raw);
            // Only registry-format numbers are comparable. Free-text filler
            // ("pending", "n/a") shows up on unrelated people and must never
            // become a merge key.
            if license.valid {
                candidate.license_numbers.insert(license.number);
            }
        }
        if let Some(cert) = record.certificate_number() {
            candidate.certificate_numbers.insert(cert.to_string());
        }

        for address in split_addresses(&record.address) {
            match self.zips.lookup_zip(&address) {
                Some(zip) => {
                    candidate.zip_codes.insert(zip);
                }
                None => report.unresolved_addresses += 1,
            }
        }

        let blob = record.credentials.trim();
        if !blob.is_empty() {
            let parse = parser.parse(blob);
            report.tally_credentials(&parse);
            candidate.credentials.push(parse);
        }

        report.resolved_rows += 1;
        Some(candidate)
    }
}

/// One convergence pass over a bucket: pop a candidate, scan the accepted
/// uniques for a same-person match, merge into the first hit or accept.
fn converge(mut pending: Vec<IdentityCandidate>) -> Vec<IdentityCandidate> {
    let mut uniques: Vec<IdentityCandidate> = Vec::with_capacity(pending.len());
    // Preserve insertion order; pop from the front.
    pending.reverse();
    while let Some(candidate) = pending.pop() {
        match uniques.iter_mut().find(|u| is_same_person(u, &candidate)) {
            Some(unique) => unique.merge(candidate),
            None => uniques.push(candidate),
        }
    }
    uniques
}

/// Catch identities recorded under inconsistent surnames: group by full-name
/// key, which ignores the bucket-defining last name.
fn cross_bucket_pass(
    buckets: BTreeMap<String, Vec<IdentityCandidate>>,
    report: &mut ResolutionReport,
) -> Vec<IdentityCandidate> {
    let mut accepted: Vec<Option<IdentityCandidate>> = Vec::new();
    let mut key_owner: HashMap<String, usize> = HashMap::new();

    for candidate in buckets.into_values().flatten() {
        let owner = candidate
            .full_name_keys
            .iter()
            .find_map(|key| key_owner.get(key).copied())
            .filter(|idx| {
                accepted[*idx]
                    .as_ref()
                    .is_some_and(|owner| is_same_person(owner, &candidate))
            });

        let idx = match owner {
            Some(idx) => {
                let owner = accepted[idx].as_mut().expect("owner slot is occupied");
                owner.merge(candidate);
                report.cross_bucket_merges += 1;
                idx
            }
            None => {
                accepted.push(Some(candidate));
                accepted.len() - 1
            }
        };

        let keys: Vec<String> = accepted[idx]
            .as_ref()
            .expect("slot just written")
            .full_name_keys
            .iter()
            .cloned()
            .collect();
        for key in keys {
            key_owner.entry(key).or_insert(idx);
        }
    }

    accepted.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedZips(HashMap<String, String>);

    impl ZipLookup for FixedZips {
        fn lookup_zip(&self, raw_address: &str) -> Option<String> {
            self.0.get(raw_address).cloned()
        }
    }

    fn record(id: i64, first: &str, last: &str) -> RawRecord {
        RawRecord {
            id,
            first_name: first.into(),
            last_name: last.into(),
            credentials: String::new(),
            certificate_number: None,
            license_number: None,
            directory_id: Some("dir".into()),
            payor_id: None,
            address: String::new(),
            phone: String::new(),
        }
    }

    fn resolve(records: &[RawRecord]) -> (Vec<IdentityCandidate>, ResolutionReport) {
        let vocab = Vocabulary::load().expect("vocabulary must load");
        let zips = FixedZips(HashMap::new());
        let resolver = Resolver::new(&vocab, &zips, ResolveConfig::default());
        resolver.resolve(records)
    }

    #[test]
    fn shared_certificate_merges_initialed_first_name() {
        let mut a = record(1, "Jane", "Smith");
        a.certificate_number = Some("123".into());
        let mut b = record(2, "J", "Smith");
        b.certificate_number = Some("123".into());

        let (candidates, _) = resolve(&[a, b]);
        assert_eq!(candidates.len(), 1);
        let rows: Vec<i64> = candidates[0].row_ids.iter().copied().collect();
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn different_people_stay_apart() {
        let (candidates, _) = resolve(&[record(1, "Jane", "Smith"), record(2, "John", "Smith")]);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn shared_junk_license_text_is_not_identity_evidence() {
        let mut a = record(1, "Jane", "Smith");
        a.license_number = Some("pending".into());
        let mut b = record(2, "John", "Smith");
        b.license_number = Some("pending".into());

        let (candidates, _) = resolve(&[a, b]);
        assert_eq!(candidates.len(), 2);
        for candidate in &candidates {
            assert!(candidate.license_numbers.is_empty());
        }
    }

    #[test]
    fn two_passes_catch_transitive_merges() {
        // A and C share nothing directly; B bridges them. Processed in an
        // order where one pass cannot see the bridge from A's side.
        let mut a = record(1, "Jane", "Smith");
        a.certificate_number = Some("X".into());
        let mut c = record(2, "Jane", "Smith");
        c.license_number = Some("054812".into());
        let mut b = record(3, "Jane", "Smith");
        b.certificate_number = Some("X".into());
        b.license_number = Some("054812".into());

        // Strip name signals so only cert/license links can merge.
        for r in [&mut a, &mut b, &mut c] {
            r.first_name = String::new();
        }

        let (candidates, _) = resolve(&[a, c, b]);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].row_ids.len(), 3);
    }

    #[test]
    fn partition_invariant_holds() {
        let mut records = Vec::new();
        for id in 0..20 {
            let mut r = record(id, "Jane", "Roe");
            if id % 2 == 0 {
                r.certificate_number = Some("C1".into());
            }
            records.push(r);
        }

        let (candidates, report) = resolve(&records);
        let mut seen = std::collections::BTreeSet::new();
        for candidate in &candidates {
            for row in &candidate.row_ids {
                assert!(seen.insert(*row), "row {row} appears twice");
            }
        }
        assert_eq!(seen.len() + report.skipped.len(), records.len());
    }

    #[test]
    fn rows_without_surname_are_reported() {
        let (candidates, report) = resolve(&[record(1, "Jane", ""), record(2, "Jane", "Smith")]);
        assert_eq!(candidates.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::NoLastName);
    }

    #[test]
    fn zip_plus_initials_merges() {
        let mut zips = HashMap::new();
        zips.insert("1 Main St".to_string(), "10001".to_string());
        zips.insert("1 Main Street".to_string(), "10001".to_string());

        let mut a = record(1, "Jane", "Smith");
        a.address = "1 Main St".into();
        let mut b = record(2, "J", "Smith");
        b.address = "1 Main Street".into();

        let vocab = Vocabulary::load().expect("vocabulary must load");
        let lookup = FixedZips(zips);
        let resolver = Resolver::new(&vocab, &lookup, ResolveConfig::default());
        let (candidates, _) = resolver.resolve(&[a, b]);
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn cross_bucket_pass_merges_surname_variants() {
        // One source puts "Jane" in the surname field, the other in the
        // first-name field. The buckets differ but the full-name key agrees.
        let mut a = record(1, "Mary Jane", "Smith");
        a.certificate_number = Some("777".into());
        let mut b = record(2, "Mary", "Jane Smith");
        b.certificate_number = Some("777".into());

        let (candidates, report) = resolve(&[a, b]);
        assert_eq!(candidates.len(), 1);
        assert_eq!(report.cross_bucket_merges, 1);
    }

    #[test]
    fn address_blob_splits_on_blank_lines() {
        let blob = "1 Main St\nSuite 4\n\n2 Elm Ave\n";
        let addresses = split_addresses(blob);
        assert_eq!(addresses, vec!["1 Main St Suite 4", "2 Elm Ave"]);
    }
}
