use std::path::PathBuf;

use pdr_match::{MatchOutcome, NationalMatchOutcome};
use pdr_resolve::ResolutionReport;

#[derive(Debug)]
pub struct ResolveRunResult {
    pub candidates: usize,
    pub report: ResolutionReport,
    pub store_dir: PathBuf,
    pub row_map_faults: usize,
}

#[derive(Debug)]
pub struct AuthorityRunResult {
    pub outcome: MatchOutcome,
    pub parse_failures: Vec<String>,
    pub artifacts: Option<PathBuf>,
}

#[derive(Debug)]
pub struct NationalRunResult {
    pub outcome: NationalMatchOutcome,
    pub artifacts: Option<PathBuf>,
}
