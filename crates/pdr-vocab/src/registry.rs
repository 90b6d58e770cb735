use std::collections::{BTreeMap, BTreeSet};

use crate::credentials::{
    CREDENTIAL_REQUIRED_DEGREES, CREDENTIAL_TABLE, IMPLICIT_BOARD_CERTIFICATION,
};
use crate::degrees::{DEGREE_TABLE, Degree, QUALIFYING_DOCTORAL_DEGREES};
use crate::error::{Result, VocabError};

/// Immutable degree and credential vocabularies, built once at startup.
///
/// The two acronym spaces must be disjoint: a token found in both could not
/// be classified, so [`Vocabulary::load`] fails before any data is processed.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    degrees: BTreeMap<String, Degree>,
    /// acronym → full name
    credentials: BTreeMap<String, String>,
    /// full name → acronym, for tokens written out long-hand
    credential_names: BTreeMap<String, String>,
}

impl Vocabulary {
    /// Build the vocabularies from the static reference tables.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::DuplicateAcronym`] when a table defines an
    /// acronym twice, and [`VocabError::Collision`] when a token exists in
    /// both the degree and credential vocabularies. Both are startup-fatal.
    pub fn load() -> Result<Self> {
        let mut degrees = BTreeMap::new();
        for (level, name, acronyms) in DEGREE_TABLE {
            for acronym in *acronyms {
                let degree = Degree {
                    acronym: (*acronym).to_string(),
                    level: *level,
                    name: format!("{} of {}", level.label(), name),
                };
                if degrees.insert((*acronym).to_string(), degree).is_some() {
                    return Err(VocabError::DuplicateAcronym {
                        vocabulary: "degree",
                        acronym: (*acronym).to_string(),
                    });
                }
            }
        }

        let mut credentials = BTreeMap::new();
        let mut credential_names = BTreeMap::new();
        for (acronym, name) in CREDENTIAL_TABLE {
            if degrees.contains_key(*acronym) {
                return Err(VocabError::Collision {
                    token: (*acronym).to_string(),
                });
            }
            if credentials
                .insert((*acronym).to_string(), (*name).to_string())
                .is_some()
            {
                return Err(VocabError::DuplicateAcronym {
                    vocabulary: "credential",
                    acronym: (*acronym).to_string(),
                });
            }
            credential_names.insert((*name).to_string(), (*acronym).to_string());
        }

        Ok(Self {
            degrees,
            credentials,
            credential_names,
        })
    }

    pub fn is_degree(&self, token: &str) -> bool {
        self.degrees.contains_key(token)
    }

    pub fn degree(&self, acronym: &str) -> Option<&Degree> {
        self.degrees.get(acronym)
    }

    pub fn is_credential(&self, token: &str) -> bool {
        self.credentials.contains_key(token)
    }

    pub fn credential_name(&self, acronym: &str) -> Option<&str> {
        self.credentials.get(acronym).map(String::as_str)
    }

    /// Resolve a credential written out long-hand ("licensed clinical social
    /// worker") to its acronym.
    pub fn credential_for_name(&self, name: &str) -> Option<&str> {
        self.credential_names.get(name).map(String::as_str)
    }

    /// Doctoral degrees that qualify for degree-scoped registry matching.
    pub fn qualifying_doctoral_degrees(&self) -> BTreeSet<&'static str> {
        QUALIFYING_DOCTORAL_DEGREES.iter().copied().collect()
    }

    /// Credentials for which a bare "BC" marker is redundant.
    pub fn implicit_board_certification(&self) -> BTreeSet<&'static str> {
        IMPLICIT_BOARD_CERTIFICATION.iter().copied().collect()
    }

    /// `(credential, required degree)` pairs for parse-report warnings.
    pub fn credential_required_degrees(&self) -> &'static [(&'static str, &'static str)] {
        CREDENTIAL_REQUIRED_DEGREES
    }

    pub fn degrees(&self) -> impl Iterator<Item = &Degree> {
        self.degrees.values()
    }

    /// `(acronym, full name)` pairs in acronym order.
    pub fn credentials(&self) -> impl Iterator<Item = (&str, &str)> {
        self.credentials
            .iter()
            .map(|(acronym, name)| (acronym.as_str(), name.as_str()))
    }

    pub fn degree_count(&self) -> usize {
        self.degrees.len()
    }

    pub fn credential_count(&self) -> usize {
        self.credentials.len()
    }
}
