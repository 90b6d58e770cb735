//! Command implementations: each subcommand loads its inputs, drives the
//! library crates, persists artifacts, and returns a result for the summary
//! printer.

use std::time::Instant;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use pdr_match::{IdentitySearch, LicenseIndex, Matcher, match_national, parse_extract, parse_lines};
use pdr_resolve::{JsonFileStore, ResolveConfig, Resolver, RowMapStore, ZipLookup, assign};
use pdr_vocab::Vocabulary;

use crate::cli::{MatchAuthorityArgs, MatchNationalArgs, ResolveArgs};
use crate::io::{CsvZipTable, NoZips, load_records, read_extract_lines, write_json};
use crate::summary::{apply_table_style, header_cell};
use crate::types::{AuthorityRunResult, NationalRunResult, ResolveRunResult};

pub fn run_resolve(args: &ResolveArgs) -> Result<ResolveRunResult> {
    let span = info_span!("resolve", records = %args.records.display());
    let _guard = span.enter();
    let started = Instant::now();

    let vocab = Vocabulary::load().context("load vocabularies")?;
    let records = load_records(&args.records)?;
    info!(rows = records.len(), "loaded raw records");

    let zips: Box<dyn ZipLookup> = match &args.zips {
        Some(path) => {
            let table = CsvZipTable::load(path)?;
            info!(entries = table.len(), "loaded zip table");
            Box::new(table)
        }
        None => {
            warn!("no zip table; address corroboration is disabled for this batch");
            Box::new(NoZips)
        }
    };

    let config = ResolveConfig {
        passes: args.passes,
    };
    let resolver = Resolver::new(&vocab, zips.as_ref(), config);
    let (candidates, report) = resolver.resolve(&records);

    let (identities, map) = assign(candidates);
    let row_map_faults = map.faults().len();

    let store = JsonFileStore::new(&args.store)?;
    store.replace_all(&identities, &map)?;

    if let Some(path) = &args.report {
        write_json(path, &report)?;
    }

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        identities = identities.len(),
        "resolution persisted"
    );

    Ok(ResolveRunResult {
        candidates: identities.len(),
        report,
        store_dir: args.store.clone(),
        row_map_faults,
    })
}

pub fn run_match_authority(args: &MatchAuthorityArgs) -> Result<AuthorityRunResult> {
    let span = info_span!("match_authority", extract = %args.extract.display());
    let _guard = span.enter();

    let vocab = Vocabulary::load().context("load vocabularies")?;
    let batch = load_batch(&args.store)?;

    let lines = read_extract_lines(&args.extract)?;
    let (records, failures) = parse_lines(&lines);
    if !failures.is_empty() {
        warn!(failures = failures.len(), "extract lines failed to parse");
    }

    let index = LicenseIndex::from_identities(&batch.identities);
    let search = IdentitySearch::build(&batch.identities, &vocab);
    let outcome = Matcher::new(&index, &search).run(&records);

    let artifacts = match &args.output_dir {
        Some(dir) => {
            write_json(&dir.join("authority_match.json"), &outcome)?;
            Some(dir.clone())
        }
        None => None,
    };

    Ok(AuthorityRunResult {
        outcome,
        parse_failures: failures.iter().map(|f| f.to_string()).collect(),
        artifacts,
    })
}

pub fn run_match_national(args: &MatchNationalArgs) -> Result<NationalRunResult> {
    let span = info_span!("match_national", extract = %args.extract.display());
    let _guard = span.enter();

    let batch = load_batch(&args.store)?;
    let raw = std::fs::read_to_string(&args.extract)
        .with_context(|| format!("Failed to read extract: {}", args.extract.display()))?;
    let records = parse_extract(&raw).context("parse national extract")?;
    info!(records = records.len(), "loaded national extract");

    let index = LicenseIndex::from_identities(&batch.identities);
    let outcome = match_national(&records, &index);

    let artifacts = match &args.output_dir {
        Some(dir) => {
            write_json(&dir.join("national_match.json"), &outcome)?;
            Some(dir.clone())
        }
        None => None,
    };

    Ok(NationalRunResult { outcome, artifacts })
}

pub fn run_vocab() -> Result<()> {
    let vocab = Vocabulary::load().context("load vocabularies")?;

    let mut degrees = Table::new();
    degrees.set_header(vec![
        header_cell("Acronym"),
        header_cell("Level"),
        header_cell("Name"),
    ]);
    apply_table_style(&mut degrees);
    for degree in vocab.degrees() {
        degrees.add_row(vec![
            degree.acronym.clone(),
            degree.level.label().to_string(),
            degree.name.clone(),
        ]);
    }
    println!("Degrees ({}):", vocab.degree_count());
    println!("{degrees}");

    let mut credentials = Table::new();
    credentials.set_header(vec![header_cell("Acronym"), header_cell("Name")]);
    apply_table_style(&mut credentials);
    for (acronym, name) in vocab.credentials() {
        credentials.add_row(vec![acronym.to_string(), name.to_string()]);
    }
    println!("Credentials ({}):", vocab.credential_count());
    println!("{credentials}");
    Ok(())
}

fn load_batch(store_dir: &std::path::Path) -> Result<pdr_resolve::StoredBatch> {
    let store = JsonFileStore::new(store_dir)?;
    let Some(batch) = store.load()? else {
        bail!(
            "no resolved batch at {}; run `pdr resolve` first",
            store_dir.display()
        );
    };
    info!(
        identities = batch.identities.len(),
        rows = batch.map.len(),
        "loaded resolved batch"
    );
    Ok(batch)
}
