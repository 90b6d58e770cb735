//! Licensure and certification reference table.
//!
//! `(acronym, full name)` pairs. Acronyms must never collide with the degree
//! vocabulary; `Vocabulary::load` enforces that at startup.

pub(crate) const CREDENTIAL_TABLE: &[(&str, &str)] = &[
    ("lcsw", "licensed clinical social worker"),
    ("lcsw-r", "licensed clinical social worker with r privileges"),
    ("lcsw-c", "licensed certified social worker - clinical"),
    ("lcsw-cp", "licensed clinical social worker of clinical practice"),
    ("lcsw-acp", "licensed clinical social worker - advanced clinical practitioner"),
    ("lmsw", "licensed master social worker"),
    ("acsw", "academy of certified social workers"),
    ("osw-c", "oncology social worker - certified"),
    ("csw-r", "certified social worker with r privileges"),
    ("lmhc", "licensed mental health counselor"),
    ("lmft", "licensed marriage and family therapist"),
    ("mft", "marriage and family therapist"),
    ("lcat", "licensed creative arts therapist"),
    ("lcpc", "licensed clinical professional counselor"),
    ("lpc", "licensed professional counselor"),
    ("npp", "nurse practitioner in psychiatry"),
    ("pmhnp", "psychiatric mental health nurse practitioner"),
    ("pmhcns", "psychiatric mental health clinical nurse specialist"),
    ("aprn", "advanced practice registered nurse"),
    ("rn", "registered nurse"),
    ("bcd", "board certified diplomate in clinical social work"),
    ("abpp", "american board of professional psychology"),
    ("faacp", "fellow of the american academy of clinical psychology"),
    ("casac", "credentialed alcoholism and substance abuse counselor"),
    ("casac-t", "credentialed alcoholism and substance abuse counselor trainee"),
    ("casac-g", "credentialed alcoholism and substance abuse counselor provisional"),
    ("cams-i", "certified anger management specialist i"),
    ("cams-ii", "certified anger management specialist ii"),
    ("cams-iii", "certified anger management specialist iii"),
    ("cams-iv", "certified anger management specialist iv"),
    ("cams-v", "certified anger management specialist v"),
    ("ncac-i", "national certified addiction counselor level i"),
    ("ncac-ii", "national certified addiction counselor level ii"),
    ("c-iayt", "certified yoga therapist"),
    ("dmt", "dance movement therapist"),
    ("bcb", "board certified in biofeedback"),
    ("cgp", "certified group psychotherapist"),
    ("crc", "certified rehabilitation counselor"),
    ("cfp", "certified focusing professional"),
    ("catc", "certified addiction treatment counselor"),
];

/// Credentials which may only be held alongside a specific degree. Parses
/// carrying the credential without the degree are surfaced as warnings.
pub(crate) const CREDENTIAL_REQUIRED_DEGREES: &[(&str, &str)] = &[("faacp", "phd")];

/// Credentials for which a bare "BC" (board certified) marker is redundant.
pub(crate) const IMPLICIT_BOARD_CERTIFICATION: &[&str] =
    &["aprn", "pmhnp", "md", "lcat", "pmhcns", "rn"];
