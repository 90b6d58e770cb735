//! File loading for the CLI: scraped-row CSVs, the address→zip table, and
//! registry extracts.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use pdr_model::RawRecord;
use pdr_resolve::ZipLookup;

/// Load scraped directory rows from a headered CSV file.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open records file: {}", path.display()))?;

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize().enumerate() {
        let record: RawRecord =
            row.with_context(|| format!("{}: bad record on data row {}", path.display(), idx + 1))?;
        records.push(record);
    }
    Ok(records)
}

/// Address→zip table backed by a two-column CSV (`address,zip_code`).
#[derive(Debug, Default)]
pub struct CsvZipTable {
    entries: HashMap<String, String>,
}

impl CsvZipTable {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("Failed to open zip table: {}", path.display()))?;

        let mut entries = HashMap::new();
        for row in reader.records() {
            let row = row.with_context(|| format!("{}: bad zip table row", path.display()))?;
            if let (Some(address), Some(zip)) = (row.get(0), row.get(1)) {
                entries.insert(address.to_string(), zip.to_string());
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ZipLookup for CsvZipTable {
    fn lookup_zip(&self, raw_address: &str) -> Option<String> {
        self.entries.get(raw_address).cloned()
    }
}

/// Empty lookup for runs without a zip table; every address goes unresolved.
#[derive(Debug, Default)]
pub struct NoZips;

impl ZipLookup for NoZips {
    fn lookup_zip(&self, _raw_address: &str) -> Option<String> {
        None
    }
}

/// Read a registry extract line by line with a progress bar.
pub fn read_extract_lines(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read extract: {}", path.display()))?;
    let lines: Vec<&str> = contents.lines().collect();

    let progress = ProgressBar::new(lines.len() as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    ) {
        progress.set_style(style.progress_chars("=> "));
    }
    progress.set_message("reading extract");

    let mut owned = Vec::with_capacity(lines.len());
    for line in lines {
        owned.push(line.to_string());
        progress.inc(1);
    }
    progress.finish_and_clear();
    Ok(owned)
}

/// Write a serializable artifact as pretty JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("pdr_cli_{stamp}_{name}"));
        fs::write(&path, contents).expect("write temp file");
        path
    }

    #[test]
    fn records_csv_round_trips_optionals() {
        let path = temp_file(
            "records.csv",
            "id,first_name,last_name,credentials,certificate_number,license_number,directory_id,payor_id,address,phone\n\
             1,Jane,Smith,\"PhD, LCSW\",123,,ptoday,,1 Main St,212-555-0100\n\
             2,J,Smith,,,054812,,payor-3,,\n",
        );
        let records = load_records(&path).expect("records load");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].certificate_number(), Some("123"));
        assert_eq!(records[0].license_number(), None);
        assert_eq!(records[1].source_id(), Some("payor-3"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn zip_table_lookup() {
        let path = temp_file("zips.csv", "address,zip_code\n1 Main St,10001\n");
        let table = CsvZipTable::load(&path).expect("zip table loads");
        assert_eq!(table.lookup_zip("1 Main St").as_deref(), Some("10001"));
        assert_eq!(table.lookup_zip("2 Elm Ave"), None);
        let _ = fs::remove_file(&path);
    }
}
