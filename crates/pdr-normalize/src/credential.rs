//! Free-text credential string parsing.
//!
//! Splits a scraped credentials/licensure blob ("PhD, LCSW-R, EMDR") into
//! typed buckets: degrees, credentials, modalities, honorifics, and a pile of
//! unknowns kept for reporting. Ambiguous markers that cannot be resolved
//! from the string alone ("LP", "BC") become boolean flags on the parse.

use pdr_model::CredentialParse;
use pdr_vocab::Vocabulary;
use pdr_vocab::tables::{
    ALIAS_MAP, BLACKLIST, EXTRAS, HONORIFICS, LIST_DELIMITER, MODALITIES, PREFIX_REPLACEMENTS,
    WARN_LIST,
};

/// Credential parser over an injected, already collision-checked vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct CredentialParser<'v> {
    vocab: &'v Vocabulary,
}

impl<'v> CredentialParser<'v> {
    pub fn new(vocab: &'v Vocabulary) -> Self {
        Self { vocab }
    }

    /// Parse one raw credentials string.
    pub fn parse(&self, raw: &str) -> CredentialParse {
        let mut parse = CredentialParse::default();

        // Ordered literal replacements come before any splitting; typo fixes
        // must land before ","/"and"/"/" are rewritten to the delimiter.
        let mut text = raw.trim().to_lowercase();
        for (from, to) in PREFIX_REPLACEMENTS {
            text = text.replace(from, to);
        }

        let tokens = self.split_raw(&text, &mut parse);
        self.bucket_tokens(tokens, &mut parse);
        Self::post_process(&mut parse, self.vocab);
        parse
    }

    /// Split on the list delimiter, expand aliases, and strip out everything
    /// the support tables already classify. Whatever survives is exploded on
    /// internal whitespace into acronym-sized tokens.
    fn split_raw(&self, text: &str, parse: &mut CredentialParse) -> Vec<String> {
        let mut expanded: Vec<String> = Vec::new();
        for element in text.split(LIST_DELIMITER) {
            let element = element.trim();
            if element.is_empty() {
                continue;
            }
            match ALIAS_MAP.iter().find(|(from, _)| *from == element) {
                Some((_, targets)) => {
                    expanded.extend(targets.iter().map(|t| (*t).to_string()));
                }
                None => expanded.push(element.to_string()),
            }
        }

        let mut pruned: Vec<String> = Vec::new();
        for element in expanded {
            // Multi-word phrases must be matched whole before the explosion
            // below tears them apart.
            if BLACKLIST.contains(&element.as_str()) {
                parse.blacklisted.insert(element);
                continue;
            }
            if WARN_LIST.contains(&element.as_str()) {
                parse.warn.insert(element);
                continue;
            }
            if HONORIFICS.contains(&element.as_str()) {
                parse.honorifics.insert(element);
                continue;
            }
            if MODALITIES.contains(&element.as_str()) {
                parse.modalities.insert(element);
                continue;
            }
            if let Some(acronym) = self.vocab.credential_for_name(&element) {
                pruned.push(acronym.to_string());
                continue;
            }
            pruned.extend(
                element
                    .split_whitespace()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty()),
            );
        }
        pruned
    }

    /// Classify surviving tokens against the two vocabularies and the
    /// special-cased ambiguous markers.
    fn bucket_tokens(&self, tokens: Vec<String>, parse: &mut CredentialParse) {
        for token in tokens {
            match token.as_str() {
                // "Board certified" with nothing to attach it to; may be
                // cleared in the post-pass.
                "bc" => parse.ambiguous_board_certification = true,
                // Coerced: a bare CSW is treated as LCSW.
                "csw" => {
                    parse.valid_credentials.insert("lcsw".to_string());
                }
                "cp" => parse.cp_credential = true,
                "psya" => parse.psya_credential = true,
                "lp" => parse.lp_credential = true,
                "csat" => parse.csat_credential = true,
                // The one extra that legitimately contains "and"; treated as
                // an honorific rather than a trackable extra.
                "__DAG" => {
                    parse.honorifics.insert(extra_name("__DAG"));
                }
                _ if self.vocab.is_degree(&token) => {
                    parse.valid_degrees.insert(token);
                }
                _ if self.vocab.is_credential(&token) => {
                    parse.valid_credentials.insert(token);
                }
                _ if is_extra(&token) => {
                    parse.extras.insert(extra_name(&token));
                }
                _ => {
                    parse.unknown.insert(token);
                }
            }
        }
    }

    /// Inference that needs the fully parsed result.
    fn post_process(parse: &mut CredentialParse, vocab: &Vocabulary) {
        if parse.ambiguous_board_certification {
            // If any resolved credential implies board certification, the
            // bare "BC" was redundant, not ambiguous.
            let implicit = vocab.implicit_board_certification();
            if parse
                .valid_credentials
                .iter()
                .any(|c| implicit.contains(c.as_str()))
            {
                parse.ambiguous_board_certification = false;
            }
        }
    }
}

fn is_extra(token: &str) -> bool {
    EXTRAS.iter().any(|(code, _)| *code == token)
}

fn extra_name(token: &str) -> String {
    EXTRAS
        .iter()
        .find(|(code, _)| *code == token)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| token.to_string())
}

/// `(credential, missing required degree)` pairs for one parse; used by the
/// run report.
pub fn required_degree_violations(
    parse: &CredentialParse,
    vocab: &Vocabulary,
) -> Vec<(String, String)> {
    vocab
        .credential_required_degrees()
        .iter()
        .filter(|(cred, degree)| {
            parse.valid_credentials.contains(*cred) && !parse.valid_degrees.contains(*degree)
        })
        .map(|(cred, degree)| ((*cred).to_string(), (*degree).to_string()))
        .collect()
}
