//! Fixed-width state registry extract. One line per licensed profession per
//! person; column offsets follow the published file layout.

use chrono::NaiveDate;

use crate::error::{MatchError, Result};

const DATE_FMT: &str = "%m/%d/%y";
/// Everything through the license date is mandatory.
const MIN_LINE_LEN: usize = 168;

/// One parsed registry line.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorityRecord {
    pub profession_code: u32,
    pub registration_status: String,
    /// Zero-padded six-digit license number, canonical form.
    pub license_number: String,
    /// Name tokens as printed: surname first.
    pub names: Vec<String>,
    pub address: [String; 3],
    pub city: String,
    pub state: String,
    pub zip: Option<String>,
    pub license_date: NaiveDate,
    pub degree_date: Option<NaiveDate>,
    pub school: String,
    pub email: String,
    pub phone: String,
}

fn field(raw: &str, start: usize, end: usize) -> &str {
    raw.get(start..end.min(raw.len())).unwrap_or("").trim()
}

fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for c in raw.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

fn parse_u32(raw: &str, line: usize, field_name: &'static str) -> Result<u32> {
    raw.trim()
        .parse()
        .map_err(|_| MatchError::BadNumber {
            line,
            field: field_name,
            value: raw.to_string(),
        })
}

fn parse_date(raw: &str, line: usize, field_name: &'static str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FMT).map_err(|_| MatchError::BadDate {
        line,
        field: field_name,
        fmt: DATE_FMT,
        value: raw.to_string(),
    })
}

impl AuthorityRecord {
    /// Parse one fixed-width line. `line` is the 1-based line number, used
    /// only for error context.
    pub fn parse(raw: &str, line: usize) -> Result<Self> {
        let raw = raw.trim_end_matches(['\r', '\n']);
        if raw.len() < MIN_LINE_LEN {
            return Err(MatchError::LineTooShort {
                line,
                len: raw.len(),
                need: MIN_LINE_LEN,
            });
        }

        let profession_code = parse_u32(field(raw, 0, 2), line, "profession_code")?;
        let license_number = parse_u32(field(raw, 3, 9), line, "license_number")?;
        let names = field(raw, 9, 45)
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let license_date = parse_date(field(raw, 160, 168), line, "license_date")?;

        let degree_raw = field(raw, 174, 182);
        let degree_date = if degree_raw.is_empty() {
            None
        } else {
            Some(parse_date(degree_raw, line, "degree_date")?)
        };

        let zip = field(raw, 129, 134);

        Ok(Self {
            profession_code,
            registration_status: field(raw, 2, 3).to_string(),
            license_number: format!("{license_number:06}"),
            names,
            address: [
                title_case(field(raw, 45, 66)),
                title_case(field(raw, 66, 87)),
                title_case(field(raw, 87, 108)),
            ],
            city: title_case(field(raw, 108, 127)),
            state: field(raw, 127, 129).to_string(),
            zip: (!zip.is_empty()).then(|| zip.to_string()),
            license_date,
            degree_date,
            school: field(raw, 182, 207).to_string(),
            email: field(raw, 207, 247).to_string(),
            phone: field(raw, 247, raw.len()).to_string(),
        })
    }

    /// Stable key for this record across a run: profession, number, name.
    pub fn key(&self) -> String {
        format!(
            "{}{}:{}",
            self.profession_code,
            self.license_number,
            self.names.concat()
        )
    }

    /// Surname as the registry prints it, names field leads with it.
    pub fn last_name(&self) -> Option<&str> {
        self.names.iter().map(String::as_str).find(|n| !n.is_empty())
    }

    /// One-line address for geocoding and display.
    pub fn get_address(&self) -> String {
        let mut components: Vec<&str> = self
            .address
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        components.push(&self.city);
        components.push(&self.state);
        if let Some(zip) = &self.zip {
            components.push(zip);
        }
        components.join(" ")
    }

    pub fn has_address(&self) -> bool {
        self.address.iter().any(|line| !line.is_empty())
    }
}

/// Parse a whole extract. Malformed lines become collected errors, never a
/// failed batch.
pub fn parse_lines<I, S>(lines: I) -> (Vec<AuthorityRecord>, Vec<MatchError>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    let mut failures = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        match AuthorityRecord::parse(line, idx + 1) {
            Ok(record) => records.push(record),
            Err(err) => failures.push(err),
        }
    }
    (records, failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_line() -> String {
        let mut line = String::new();
        line.push_str("68R054812");
        line.push_str(&format!("{:<36}", "SMITH JANE Q"));
        line.push_str(&format!("{:<21}", "1 MAIN ST"));
        line.push_str(&format!("{:<21}", "SUITE 4"));
        line.push_str(&format!("{:<21}", ""));
        line.push_str(&format!("{:<19}", "NEW YORK"));
        line.push_str("NY");
        line.push_str("10001");
        line.push_str("1234"); // zip+4
        line.push_str("31"); // county
        line.push_str(&format!("{:<16}", "")); // filler through col 155
        line.push('*'); // regents action
        line.push_str("  "); // privilege codes
        line.push(' ');
        line.push_str("06/15/09"); // license date
        line.push_str("2026"); // registration ending
        line.push_str("YN"); // child abuse / infectious disease
        line.push_str("07/01/05"); // degree date
        line.push_str(&format!("{:<25}", "NYU"));
        line.push_str(&format!("{:<40}", "jane@example.com"));
        line.push_str("212-555-0100");
        line
    }

    #[test]
    fn parses_all_fields() {
        let record = AuthorityRecord::parse(&sample_line(), 1).expect("line parses");
        assert_eq!(record.profession_code, 68);
        assert_eq!(record.registration_status, "R");
        assert_eq!(record.license_number, "054812");
        assert_eq!(record.names, vec!["SMITH", "JANE", "Q"]);
        assert_eq!(record.last_name(), Some("SMITH"));
        assert_eq!(record.address[0], "1 Main St");
        assert_eq!(record.city, "New York");
        assert_eq!(record.state, "NY");
        assert_eq!(record.zip.as_deref(), Some("10001"));
        assert_eq!(
            record.license_date,
            NaiveDate::from_ymd_opt(2009, 6, 15).unwrap()
        );
        assert_eq!(
            record.degree_date,
            Some(NaiveDate::from_ymd_opt(2005, 7, 1).unwrap())
        );
        assert_eq!(record.school, "NYU");
        assert_eq!(record.email, "jane@example.com");
        assert_eq!(record.phone, "212-555-0100");
    }

    #[test]
    fn key_is_stable() {
        let record = AuthorityRecord::parse(&sample_line(), 1).expect("line parses");
        assert_eq!(record.key(), "68054812:SMITHJANEQ");
    }

    #[test]
    fn address_joins_non_empty_components() {
        let record = AuthorityRecord::parse(&sample_line(), 1).expect("line parses");
        assert_eq!(
            record.get_address(),
            "1 Main St Suite 4 New York NY 10001"
        );
    }

    #[test]
    fn short_line_is_a_parse_failure() {
        let err = AuthorityRecord::parse("68R054812 SMITH", 7).unwrap_err();
        assert!(matches!(err, MatchError::LineTooShort { line: 7, .. }));
    }

    #[test]
    fn bad_license_date_is_reported_with_context() {
        let mut line = sample_line();
        line.replace_range(160..168, "99/99/99");
        let err = AuthorityRecord::parse(&line, 3).unwrap_err();
        assert!(matches!(
            err,
            MatchError::BadDate {
                line: 3,
                field: "license_date",
                ..
            }
        ));
    }

    #[test]
    fn batch_parse_collects_failures() {
        let lines = vec![sample_line(), "garbage".to_string(), sample_line()];
        let (records, failures) = parse_lines(&lines);
        assert_eq!(records.len(), 2);
        assert_eq!(failures.len(), 1);
    }
}
