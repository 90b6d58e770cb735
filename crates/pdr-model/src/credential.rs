use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The bucketed result of parsing one free-text credentials string.
///
/// Produced by `pdr-normalize`; carried on identity candidates so the
/// resolver can compare credential evidence between rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialParse {
    /// Degree acronyms resolved against the degree vocabulary ("phd", "msw").
    pub valid_degrees: BTreeSet<String>,
    /// Credential acronyms resolved against the credential vocabulary.
    pub valid_credentials: BTreeSet<String>,
    /// Treatment modalities listed where credentials were expected.
    pub modalities: BTreeSet<String>,
    /// Vanity titles with no specific credential behind them.
    pub honorifics: BTreeSet<String>,
    /// Tokens on the warn list (pseudoscience markers and similar).
    pub warn: BTreeSet<String>,
    /// Tokens discarded outright.
    pub blacklisted: BTreeSet<String>,
    /// Special-cased markers with no category ("private practice", ...).
    pub extras: BTreeSet<String>,
    /// Tokens that resolved to nothing; surfaced for reporting, never dropped.
    pub unknown: BTreeSet<String>,

    /// Licensed psychoanalyst or licensed psychologist, unresolvable here.
    pub lp_credential: bool,
    /// Bare "CSW" with no licensure context.
    pub csw_credential: bool,
    /// Certified or clinical psychologist.
    pub cp_credential: bool,
    /// Certified sex-addiction or substance-abuse therapist.
    pub csat_credential: bool,
    /// Psychologist associate or psychoanalyst.
    pub psya_credential: bool,
    /// "BC" listed without a credential that implies board certification.
    pub ambiguous_board_certification: bool,
}

impl CredentialParse {
    /// Whether two parses look like the same underlying credential set.
    ///
    /// Matching evidence: any shared degree, credential, extra marker, or
    /// unknown token. Failing that, equality of any single ambiguity flag
    /// counts — including shared absence. That last rule is deliberately
    /// preserved from the historical resolver for compatibility with
    /// already-resolved data; see DESIGN.md before tightening it.
    pub fn deduplicate(&self, other: &CredentialParse) -> bool {
        if !self.valid_degrees.is_disjoint(&other.valid_degrees) {
            return true;
        }
        if !self.valid_credentials.is_disjoint(&other.valid_credentials) {
            return true;
        }
        if !self.extras.is_disjoint(&other.extras) {
            return true;
        }
        if !self.unknown.is_disjoint(&other.unknown) {
            return true;
        }
        if self.lp_credential == other.lp_credential {
            return true;
        }
        if self.csw_credential == other.csw_credential {
            return true;
        }
        if self.cp_credential == other.cp_credential {
            return true;
        }
        if self.psya_credential == other.psya_credential {
            return true;
        }
        false
    }

    /// True when nothing at all was recognized or flagged.
    pub fn is_empty(&self) -> bool {
        self.valid_degrees.is_empty()
            && self.valid_credentials.is_empty()
            && self.modalities.is_empty()
            && self.honorifics.is_empty()
            && self.warn.is_empty()
            && self.blacklisted.is_empty()
            && self.extras.is_empty()
            && self.unknown.is_empty()
            && !self.lp_credential
            && !self.csw_credential
            && !self.cp_credential
            && !self.csat_credential
            && !self.psya_credential
            && !self.ambiguous_board_certification
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_degree(degree: &str) -> CredentialParse {
        let mut parse = CredentialParse::default();
        parse.valid_degrees.insert(degree.to_string());
        parse
    }

    #[test]
    fn shared_degree_deduplicates() {
        let a = with_degree("phd");
        let b = with_degree("phd");
        assert!(a.deduplicate(&b));
    }

    #[test]
    fn shared_flag_absence_deduplicates() {
        // Historical behavior: two parses that both lack the lp flag match.
        let mut a = with_degree("phd");
        let b = with_degree("msw");
        assert!(a.deduplicate(&b));

        // Only flips to false once every flag disagrees and no sets overlap.
        a.lp_credential = true;
        a.csw_credential = true;
        a.cp_credential = true;
        a.psya_credential = true;
        assert!(!a.deduplicate(&b));
    }
}
