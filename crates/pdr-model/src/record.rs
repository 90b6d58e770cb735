use serde::{Deserialize, Serialize};

/// Identifier of one ingested row, unique within its source file.
pub type RowId = i64;

fn trimmed_opt(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// One scraped provider-directory row, immutable once ingested.
///
/// Many raw records may describe the same real-world person; the resolver's
/// job is to decide which ones do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Source row identifier.
    pub id: RowId,
    /// Raw first name as scraped, possibly empty or abbreviated.
    #[serde(default)]
    pub first_name: String,
    /// Raw surname as scraped.
    #[serde(default)]
    pub last_name: String,
    /// Free-text credentials/licensure blob ("PhD, LCSW", ...).
    #[serde(default)]
    pub credentials: String,
    /// Board certificate number, when the source carries one.
    #[serde(default)]
    pub certificate_number: Option<String>,
    /// State license number, free text.
    #[serde(default)]
    pub license_number: Option<String>,
    /// Identifier of the source directory this row was scraped from.
    #[serde(default)]
    pub directory_id: Option<String>,
    /// Fallback source identifier used by payor-sourced extracts.
    #[serde(default)]
    pub payor_id: Option<String>,
    /// Multi-line free-text address blob.
    #[serde(default)]
    pub address: String,
    /// Free-text phone blob.
    #[serde(default)]
    pub phone: String,
}

impl RawRecord {
    /// The effective source identifier: directory id, falling back to payor
    /// id for payor-sourced extracts.
    pub fn source_id(&self) -> Option<&str> {
        trimmed_opt(&self.directory_id).or_else(|| trimmed_opt(&self.payor_id))
    }

    pub fn certificate_number(&self) -> Option<&str> {
        trimmed_opt(&self.certificate_number)
    }

    pub fn license_number(&self) -> Option<&str> {
        trimmed_opt(&self.license_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_id_prefers_directory() {
        let mut record = RawRecord {
            id: 1,
            first_name: "Jane".into(),
            last_name: "Smith".into(),
            credentials: String::new(),
            certificate_number: None,
            license_number: None,
            directory_id: Some("ptoday".into()),
            payor_id: Some("payor-3".into()),
            address: String::new(),
            phone: String::new(),
        };
        assert_eq!(record.source_id(), Some("ptoday"));

        record.directory_id = Some("  ".into());
        assert_eq!(record.source_id(), Some("payor-3"));

        record.payor_id = None;
        assert_eq!(record.source_id(), None);
    }

    #[test]
    fn blank_numbers_read_as_missing() {
        let record = RawRecord {
            id: 2,
            first_name: String::new(),
            last_name: "Doe".into(),
            credentials: String::new(),
            certificate_number: Some(" ".into()),
            license_number: Some("054812".into()),
            directory_id: None,
            payor_id: None,
            address: String::new(),
            phone: String::new(),
        };
        assert_eq!(record.certificate_number(), None);
        assert_eq!(record.license_number(), Some("054812"));
    }
}
