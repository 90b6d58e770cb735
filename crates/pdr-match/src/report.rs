//! Artifacts of a matching run: the resolution map, the ambiguity report,
//! and the enrichment ledger.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use pdr_model::CanonicalId;

/// Everything an authority run produces.
#[derive(Debug, Serialize)]
pub struct MatchOutcome {
    /// Record key → canonical id, unique matches only.
    pub resolution: BTreeMap<String, CanonicalId>,
    /// Records whose best tier named more than one identity.
    pub ambiguous_records: BTreeMap<String, BTreeSet<CanonicalId>>,
    /// Identities claimed by more than one record, with the claiming keys.
    pub ambiguous_identities: BTreeMap<CanonicalId, Vec<String>>,
    pub enrichments: Vec<Enrichment>,
    pub summary: MatchSummary,
}

#[derive(Debug, Serialize)]
pub struct MatchSummary {
    pub total_records: usize,
    pub matched: usize,
    /// Per-tier bind counts.
    pub full_license: usize,
    pub corroborated_license: usize,
    pub name_degree: usize,
    /// Name-evidence sets that named several people; accounting only.
    pub weak_matches: usize,
    pub double_enrichments: usize,
    pub unmatched: usize,
}

impl MatchSummary {
    pub fn new(total_records: usize) -> Self {
        Self {
            total_records,
            matched: 0,
            full_license: 0,
            corroborated_license: 0,
            name_degree: 0,
            weak_matches: 0,
            double_enrichments: 0,
            unmatched: 0,
        }
    }
}

/// Everything a national run produces. The extract only supports the exact
/// license tier, so there is no tier breakdown.
#[derive(Debug, Serialize)]
pub struct NationalMatchOutcome {
    pub total_records: usize,
    /// National provider id → canonical id.
    pub resolution: BTreeMap<String, CanonicalId>,
    pub ambiguous: BTreeMap<String, BTreeSet<CanonicalId>>,
    pub unmatched: usize,
}

impl NationalMatchOutcome {
    pub fn new(total_records: usize) -> Self {
        Self {
            total_records,
            resolution: BTreeMap::new(),
            ambiguous: BTreeMap::new(),
            unmatched: 0,
        }
    }
}

/// Authority data to fold into one uniquely matched identity.
#[derive(Debug, Clone, Serialize)]
pub struct Enrichment {
    pub canonical_id: CanonicalId,
    pub record_key: String,
    pub email: Option<String>,
    pub school: Option<String>,
    pub year_graduated: Option<i32>,
    pub phones: Vec<String>,
    pub address: Option<String>,
    pub license: LicenseGrant,
    /// Directory short name to record membership under.
    pub directory: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LicenseGrant {
    pub number: String,
    pub sub_code: String,
    /// Grant date, ISO 8601.
    pub granted: String,
    pub action: LicenseAction,
}

/// How a license row applies to what the identity already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseAction {
    /// No license on record under this number.
    New,
    /// The number is on record without a sub-code; the authority row
    /// supplies it.
    UpgradeSubCode,
    /// Number and sub-code already on record; only the grant date is new.
    BackfillGrantDate,
}
