//! Parser support tables: token aliases, discard lists, and the ordered
//! literal replacements applied before any splitting happens.

/// Terms discarded outright when encountered literally. Several entries are
/// seven characters because the upstream directory truncates free text there.
pub const BLACKLIST: &[&str] = &[
    "jr",
    "sr",
    "doctora",
    "candida",
    "license",
    "psychol",
    "interna",
    "mediate",
    "elizabe",
    "psychoa",
    "hypnoth",
    "marriag",
    "therapi",
    "body",
    "mind",
    "life",
    "coach",
    "mentor",
    "dance",
    "family",
    "therapy",
    "speaker",
    "author",
    "prof",
    "staff",
    "cert",
    "clin",
    "hyp",
    "dir",
    "pllc",
    "llc",
    "the possibility practice",
    "counseling services",
    "yoga",
    "nyu",
    "ac",
];

/// Terms replaced with one or more canonical tokens when matched whole.
pub const ALIAS_MAP: &[(&str, &[&str])] = &[
    ("master social worker", &["msw"]),
    ("master social work", &["msw"]),
    ("clinical social worker", &["csw"]),
    ("clinical social work", &["csw"]),
    ("abpp-cn", &["abpp", "clinical neuropsychologist"]),
    ("ms ed", &["msed"]),
    ("r", &["lcsw-r"]),
    ("-r", &["lcsw-r"]),
    ("r-", &["lcsw-r"]),
    ("iayt", &["c-iayt"]),
    ("iayt-c", &["c-iayt"]),
    ("acsw-r", &["acsw"]),
    ("np-p", &["npp"]),
    ("psy", &["psyd"]),
    ("rdmt", &["dmt"]),
    ("r-dmt", &["dmt"]),
    ("lcswr", &["lcsw-r"]),
    ("lcswr ny nj", &["lcsw-r"]),
    ("lacsw-r", &["lcsw-r"]),
    ("lcsw - r", &["lcsw-r"]),
    ("lcsw-pr", &["lcsw-r"]),
    ("lmswny", &["lmsw"]),
    ("lmsw-lp", &["lmsw"]),
    ("osw", &["osw-c"]),
    ("oswc", &["osw-c"]),
    ("lcswnj", &["lcsw"]),
    ("r-lcsw", &["lcsw-r"]),
    ("lcswc", &["lcsw-c"]),
    ("lcswcp", &["lcsw-cp"]),
    ("mft-lp", &["lmft"]),
    ("lmft-s", &["lmft"]),
    ("mhc-lp", &["lmhc"]),
    ("-bc", &["pmhnp"]),
    ("pmhnp-", &["pmhnp"]),
    ("csac-t", &["casac-t"]),
    ("casacg", &["casac-g"]),
    ("casact", &["casac-t"]),
    ("lcswacp", &["lcsw-acp"]),
    ("pmhnp-b", &["pmhnp"]),
    ("camsi", &["cams-i"]),
    ("camsii", &["cams-ii"]),
    ("camsiii", &["cams-iii"]),
    ("camsiv", &["cams-iv"]),
    ("camsv", &["cams-v"]),
    ("cams i", &["cams-i"]),
    ("cams ii", &["cams-ii"]),
    ("cams iii", &["cams-iii"]),
    ("cams iv", &["cams-iv"]),
    ("cams v", &["cams-v"]),
    ("ncaci", &["ncac-i"]),
    ("ncacii", &["ncac-ii"]),
    ("ncac i", &["ncac-i"]),
    ("ncac ii", &["ncac-ii"]),
    // A level of training, not a certification.
    ("emdr-i", &["emdr"]),
    // "BCIA-certified" is too vague to keep as its own entry.
    ("bcia-c", &["bcb"]),
    // The ABECSW issues a BCD, the ABPsa a BCD-P; same thing in practice.
    ("bcd-p", &["bcd"]),
];

/// Markers associated with pseudoscience or otherwise suspect practice.
/// Discarded, but flagged on the parse for reporting.
pub const WARN_LIST: &[&str] = &[
    "abihm",
    "rpp",
    "evoker",
    "healer",
    "chhc",
    "hhc",
    "holistic psychotherapist",
    "intern",
    "reiki",
    "tbt",
];

/// Vanity titles providers use to market themselves; not credentials.
pub const HONORIFICS: &[&str] = &[
    "psychiatrist",
    "psychiatric nurse practitioner",
    "counselor",
    "therapist",
    "psychologist",
    "art therapist",
    "creative arts therapist",
    "licensed psychotherapist",
    "psychotherapist",
    "certified psychoanalyst",
    "licensed clinical psychologist",
    "psychiatric nurse",
    "licensed psychoanalyst",
    "licensed psychologist",
    "clinical neuropsychologist",
];

/// Treatment modalities that sometimes appear in credential lists.
pub const MODALITIES: &[&str] = &[
    "emdr",
    "analyst",
    "certified jungian analyst",
    "cft",
    "hypnotherapy",
    "act",
];

/// Ordered literal replacements applied to the raw string before splitting.
/// Order is contract: typo fixes must land before the generic separator
/// rewrites at the tail. Never replace a term with blank.
pub const PREFIX_REPLACEMENTS: &[(&str, &str)] = &[
    // Disallowed characters.
    (".", ""),
    ("(", ""),
    (")", ""),
    // Known typo patterns.
    ("mhc-, lp", "mhc-lp"),
    ("lcsw-, r", "lcsw-r"),
    (" ms, ed,", "msed;"),
    (" ma, ed,", "maed;"),
    (" ph, d,", " phd;"),
    (" l, ac,", "ac;"),
    ("ncac, ii", "ncac-ii"),
    ("cams, i", "cams-i"),
    ("cams, ii", "cams-ii"),
    ("phd ", "phd;"),
    ("casac, g,", "casac-g;"),
    // Phrases containing "and" must be escaped before "and" becomes a
    // separator.
    ("&", "and"),
    ("private practice", "__PP"),
    ("pre-licensed professional", "__PLP"),
    ("drug and alcohol counselor", "__DAG"),
    ("marriage and family therapist intern", "__MAFTI"),
    ("marriage and family therapist", "mft"),
    // Separator rewrites.
    (",", ";"),
    ("and", ";"),
    ("/", ";"),
];

/// Escape codes produced by `PREFIX_REPLACEMENTS` for phrases with no
/// category of their own.
pub const EXTRAS: &[(&str, &str)] = &[
    ("__PP", "private practice"),
    ("__PLP", "pre-licensed professional"),
    ("__MAFTI", "marriage and family therapist intern"),
    ("__DAG", "drug and alcohol counselor"),
];

/// The one splitting delimiter that is never reinterpreted.
pub const LIST_DELIMITER: char = ';';
