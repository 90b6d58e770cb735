//! Cross-authority matching: parse state and national registry extracts,
//! match them against a resolved batch through evidence tiers, and produce
//! enrichment and ambiguity artifacts.

pub mod authority;
pub mod error;
pub mod index;
pub mod matcher;
pub mod national;
pub mod report;

pub use authority::{AuthorityRecord, parse_lines};
pub use error::{MatchError, Result};
pub use index::{IdentitySearch, LicenseIndex, NameSearch};
pub use matcher::{
    AUTHORITY_DIRECTORY, Matcher, NATIONAL_DIRECTORY, PSYCHOLOGY_PROFESSION_CODE, match_national,
};
pub use national::{NationalRecord, parse_extract};
pub use report::{
    Enrichment, LicenseAction, LicenseGrant, MatchOutcome, MatchSummary, NationalMatchOutcome,
};
