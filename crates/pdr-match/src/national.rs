//! National registry extract: one JSON document per provider, pre-filtered
//! to the state of interest upstream.

use std::collections::BTreeMap;

use serde::Deserialize;

use pdr_normalize::normalize;

use crate::error::Result;

/// One provider from the national extract.
#[derive(Debug, Clone, Deserialize)]
pub struct NationalRecord {
    pub npi: String,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub credentials: Vec<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub addresses: BTreeMap<String, NationalAddress>,
    /// License number → issuing-state code, as printed in the extract. The
    /// numbers carry registry decoration (`R` prefix, `-1` suffix).
    #[serde(default)]
    pub licenses: BTreeMap<String, String>,
}

/// An address keyed by its type (`practice`, `mailing`).
#[derive(Debug, Clone, Deserialize)]
pub struct NationalAddress {
    pub first_line: String,
    #[serde(default)]
    pub second_line: String,
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
}

impl NationalRecord {
    /// License numbers in canonical form, decoration stripped and
    /// zero-padded. Non-registry values are dropped; they cannot be looked
    /// up against the index.
    pub fn cleaned_license_numbers(&self) -> Vec<String> {
        self.licenses
            .keys()
            .filter_map(|raw| {
                let license = normalize(raw);
                license.valid.then_some(license.number)
            })
            .collect()
    }
}

/// Parse the whole extract (a JSON array of records).
pub fn parse_extract(raw: &str) -> Result<Vec<NationalRecord>> {
    Ok(serde_json::from_str(raw)?)
}
