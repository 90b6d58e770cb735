//! Free-text license-number normalization.
//!
//! Turns the license identifiers scraped from directory listings and registry
//! extracts ("R-054812-1", "LCSW-R 019020-1", "68054812") into a canonical
//! zero-padded 6-digit number plus an optional 2-digit profession sub-code.
//!
//! The function is pure and order-sensitive: profession-prefix stripping runs
//! before digit extraction, so a prefix token can never be misread as part of
//! the number. Rule order is part of the contract.

/// Canonical length of a registry license number.
const NUMBER_LEN: usize = 6;

/// Length of the profession sub-code prefix on 8-digit numbers.
const SUB_CODE_LEN: usize = 2;

/// Trailing digit appended by one upstream source's registration suffix
/// ("-1" collapsed into the number).
const REGISTRATION_NOISE_DIGIT: char = '1';

/// Professional abbreviations that prefix license numbers in free text.
/// Stripped before any digit extraction.
const PROFESSION_PREFIXES: &[&str] = &["LCSW", "LMSW", "LMHC", "LMFT", "LCAT", "CSW", "NPP"];

/// Separator between multiple license values in one field; only the first
/// segment is considered.
const MULTI_VALUE_SEPARATOR: char = ';';

/// Result of normalizing one raw license string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLicense {
    /// Zero-padded 6-digit canonical number, or the original raw string when
    /// `valid` is false and no numeric token was found.
    pub number: String,
    /// 2-digit profession sub-code when one was present, else empty.
    pub sub_code: String,
    /// False when the input is not a registry-format license. Callers must
    /// treat that as "not comparable", not as an error.
    pub valid: bool,
}

impl NormalizedLicense {
    fn invalid(number: String) -> Self {
        Self {
            number,
            sub_code: String::new(),
            valid: false,
        }
    }
}

/// Normalize a free-text license identifier.
///
/// Re-normalizing the `number` of a valid result is a no-op.
pub fn normalize(raw: &str) -> NormalizedLicense {
    // Uppercase first, then correct the known OCR confusion of letter O for
    // digit 0 so "O54812" reads as numeric.
    let upper = raw.trim().to_uppercase().replace('O', "0");

    let compact: String = upper.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return NormalizedLicense::invalid(raw.to_string());
    }

    if compact.chars().all(|c| c.is_ascii_digit()) {
        return match normalize_digits(&compact) {
            Some((number, sub_code)) => NormalizedLicense {
                number,
                sub_code,
                valid: true,
            },
            None => NormalizedLicense::invalid(compact),
        };
    }

    normalize_tokens(raw, &upper)
}

/// Disambiguate a purely numeric string by length.
fn normalize_digits(digits: &str) -> Option<(String, String)> {
    match digits.len() {
        8 => {
            let (sub, number) = digits.split_at(SUB_CODE_LEN);
            Some((number.to_string(), sub.to_string()))
        }
        7 if digits.ends_with(REGISTRATION_NOISE_DIGIT) => {
            Some((digits[..NUMBER_LEN].to_string(), String::new()))
        }
        3..=6 => Some((format!("{:0>width$}", digits, width = NUMBER_LEN), String::new())),
        _ => None,
    }
}

/// Extract number and sub-code from a mixed alpha-numeric license string.
fn normalize_tokens(raw: &str, upper: &str) -> NormalizedLicense {
    let segment = upper
        .split(MULTI_VALUE_SEPARATOR)
        .next()
        .unwrap_or_default();

    let mut tokens: Vec<&str> = segment
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    // Profession prefixes go first; only then may single-character noise
    // tokens ("R", a stray digit) be dropped.
    tokens.retain(|t| !PROFESSION_PREFIXES.contains(t));
    tokens.retain(|t| t.chars().count() > 1);

    let mut sub_code = String::new();
    let mut number: Option<String> = None;

    for token in tokens {
        // One source writes the registration prefix flush against the
        // digits ("R054812").
        let token = match token.strip_prefix('R') {
            Some(rest) if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) => rest,
            _ => token,
        };

        if !token.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        if token.len() == SUB_CODE_LEN && sub_code.is_empty() {
            sub_code = token.to_string();
            continue;
        }

        if number.is_none() {
            if let Some((num, sub)) = normalize_digits(token) {
                if sub_code.is_empty() {
                    sub_code = sub;
                }
                number = Some(num);
            }
        }
    }

    match number {
        Some(number) => NormalizedLicense {
            number,
            sub_code,
            valid: true,
        },
        // No numeric token at all: hand the raw string back unchanged so the
        // caller can treat it as a non-registry license.
        None => NormalizedLicense::invalid(raw.to_string()),
    }
}
