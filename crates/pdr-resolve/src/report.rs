//! Run accounting for a resolution batch. Nothing here feeds back into the
//! merge decisions; the report exists so operators can audit what a run did
//! and which rows never made it in.

use std::collections::BTreeMap;

use serde::Serialize;

use pdr_model::{CredentialParse, RowId};

/// Why a raw row was excluded from resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No usable surname after normalization; the row cannot be bucketed.
    NoLastName,
    /// Neither a directory id nor a payor id; the row has no provenance.
    NoSource,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    pub row_id: RowId,
    pub reason: SkipReason,
}

/// Summary of one resolution run.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionReport {
    pub total_rows: usize,
    pub resolved_rows: usize,
    /// Merged identities produced by the run.
    pub candidates: usize,
    pub skipped: Vec<SkippedRow>,
    /// Addresses the zip table had no answer for.
    pub unresolved_addresses: usize,
    pub cross_bucket_merges: usize,
    /// Credential tokens no vocabulary bucket claimed, with occurrence
    /// counts. The main lead for vocabulary gaps.
    pub unknown_tokens: BTreeMap<String, usize>,
    /// Tokens on the warn list that actually showed up in this batch.
    pub warn_tokens: BTreeMap<String, usize>,
    pub blacklisted_tokens: usize,
}

impl ResolutionReport {
    pub fn new(total_rows: usize) -> Self {
        Self {
            total_rows,
            resolved_rows: 0,
            candidates: 0,
            skipped: Vec::new(),
            unresolved_addresses: 0,
            cross_bucket_merges: 0,
            unknown_tokens: BTreeMap::new(),
            warn_tokens: BTreeMap::new(),
            blacklisted_tokens: 0,
        }
    }

    pub fn skip(&mut self, row_id: RowId, reason: SkipReason) {
        self.skipped.push(SkippedRow { row_id, reason });
    }

    /// Fold one credential parse into the token tallies.
    pub fn tally_credentials(&mut self, parse: &CredentialParse) {
        for token in &parse.unknown {
            *self.unknown_tokens.entry(token.clone()).or_insert(0) += 1;
        }
        for token in &parse.warn {
            *self.warn_tokens.entry(token.clone()).or_insert(0) += 1;
        }
        self.blacklisted_tokens += parse.blacklisted.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallies_accumulate_across_parses() {
        let mut report = ResolutionReport::new(2);

        let mut a = CredentialParse::default();
        a.unknown.insert("xyz".into());
        a.blacklisted.insert("intern".into());
        let mut b = CredentialParse::default();
        b.unknown.insert("xyz".into());
        b.warn.insert("candidate".into());

        report.tally_credentials(&a);
        report.tally_credentials(&b);

        assert_eq!(report.unknown_tokens.get("xyz"), Some(&2));
        assert_eq!(report.warn_tokens.get("candidate"), Some(&1));
        assert_eq!(report.blacklisted_tokens, 1);
    }

    #[test]
    fn skips_keep_row_ids() {
        let mut report = ResolutionReport::new(1);
        report.skip(42, SkipReason::NoSource);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row_id, 42);
    }
}
