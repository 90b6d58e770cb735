//! Person-name normalization used for bucketing and name keys.

/// Lowercase a scraped name and strip punctuation and whitespace, so
/// "St. John", "ST JOHN" and "st-john" all compare equal.
pub fn normalize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
