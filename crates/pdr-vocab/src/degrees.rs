//! Academic degree reference table.
//!
//! Acronyms are lowercase and unique across the whole table; construction
//! fails on a duplicate rather than letting one level shadow another.

/// Education level of a degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EducationLevel {
    Associate,
    Bachelor,
    Master,
    Doctor,
}

impl EducationLevel {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Associate => "associate",
            Self::Bachelor => "bachelor",
            Self::Master => "master",
            Self::Doctor => "doctor",
        }
    }
}

/// `(level, field of study, acronyms)` rows for the degree vocabulary.
pub(crate) const DEGREE_TABLE: &[(EducationLevel, &str, &[&str])] = &[
    (EducationLevel::Associate, "arts", &["aa"]),
    (EducationLevel::Associate, "science", &["as"]),
    (EducationLevel::Bachelor, "arts", &["ba", "ab", "barts"]),
    (EducationLevel::Bachelor, "applied science", &["bappsc", "basc"]),
    (EducationLevel::Bachelor, "business administration", &["bba"]),
    (EducationLevel::Bachelor, "education", &["bed"]),
    (EducationLevel::Bachelor, "engineering", &["beng", "be"]),
    (EducationLevel::Bachelor, "fine arts", &["bfa"]),
    (EducationLevel::Bachelor, "law", &["llb"]),
    (EducationLevel::Bachelor, "medicine", &["mb"]),
    (EducationLevel::Bachelor, "nursing", &["bn"]),
    (EducationLevel::Bachelor, "science", &["bs", "bsc"]),
    (EducationLevel::Bachelor, "science in nursing", &["bsn"]),
    (EducationLevel::Master, "arts", &["ma", "am"]),
    (EducationLevel::Master, "business administration", &["mba"]),
    (EducationLevel::Master, "divinity", &["mdiv"]),
    (EducationLevel::Master, "education", &["med", "maed"]),
    (EducationLevel::Master, "fine arts", &["mfa"]),
    (EducationLevel::Master, "laws", &["llm"]),
    (EducationLevel::Master, "professional studies", &["mps"]),
    (EducationLevel::Master, "public administration", &["mpa"]),
    (EducationLevel::Master, "public health", &["mph"]),
    (EducationLevel::Master, "science", &["ms", "msc"]),
    (EducationLevel::Master, "science in education", &["msed"]),
    (EducationLevel::Master, "science in social work", &["mssw"]),
    (EducationLevel::Master, "social work", &["msw"]),
    (EducationLevel::Doctor, "audiology", &["aud"]),
    (EducationLevel::Doctor, "chiropractic", &["dc"]),
    (EducationLevel::Doctor, "dental surgery", &["dds"]),
    (EducationLevel::Doctor, "education", &["edd"]),
    (EducationLevel::Doctor, "medical dentistry", &["dmd"]),
    (EducationLevel::Doctor, "medicine", &["md"]),
    (EducationLevel::Doctor, "naturopathy", &["nd"]),
    (EducationLevel::Doctor, "nursing practice", &["dnp"]),
    (EducationLevel::Doctor, "optometry", &["od"]),
    (EducationLevel::Doctor, "osteopathy", &["do"]),
    (EducationLevel::Doctor, "pharmacy", &["pharmd"]),
    (EducationLevel::Doctor, "philosophy", &["phd", "dphil", "dph"]),
    (EducationLevel::Doctor, "physical therapy", &["dpt"]),
    (EducationLevel::Doctor, "psychology", &["psyd"]),
    (EducationLevel::Doctor, "public health", &["drph"]),
    (EducationLevel::Doctor, "science", &["dsc", "scd"]),
    (EducationLevel::Doctor, "veterinary medicine", &["dvm"]),
];

/// Doctoral degrees that qualify for degree-scoped registry matching.
pub(crate) const QUALIFYING_DOCTORAL_DEGREES: &[&str] = &["phd", "psyd", "dph"];

/// One resolved degree entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degree {
    pub acronym: String,
    pub level: EducationLevel,
    /// Full name, e.g. "doctor of philosophy".
    pub name: String,
}
