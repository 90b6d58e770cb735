//! Persistence for resolution output. The row map and the canonical
//! identities are written together so a batch is either fully replaced or
//! not at all from the reader's point of view.
//!
//! Storage is plain JSON under a base directory:
//! `row_map.json` and `identities.json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use pdr_model::{CanonicalId, CanonicalIdentity, RowId, RowMap};

/// Store for a resolved batch. Resolution always replaces the whole batch;
/// there is no incremental update path.
pub trait RowMapStore {
    /// Replace any stored batch with this one.
    fn replace_all(&self, identities: &[CanonicalIdentity], map: &RowMap) -> Result<()>;

    /// Load the stored batch, if one exists.
    fn load(&self) -> Result<Option<StoredBatch>>;

    /// Look up the canonical id for a raw row in the stored batch.
    fn get(&self, row_id: RowId) -> Result<Option<CanonicalId>> {
        Ok(self.load()?.and_then(|batch| batch.map.get(row_id)))
    }
}

/// A persisted resolution batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredBatch {
    pub identities: Vec<CanonicalIdentity>,
    pub map: RowMap,
    /// When the batch was written (ISO 8601).
    pub saved_at: Option<String>,
}

/// File-system backed store, one directory per pipeline.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store at the given directory, creating it if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("Failed to create store directory: {}", base_dir.display()))?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn map_path(&self) -> PathBuf {
        self.base_dir.join("row_map.json")
    }

    fn identities_path(&self) -> PathBuf {
        self.base_dir.join("identities.json")
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", path.display()))?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<T> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

impl RowMapStore for JsonFileStore {
    fn replace_all(&self, identities: &[CanonicalIdentity], map: &RowMap) -> Result<()> {
        self.write_json(&self.identities_path(), &identities)?;
        let batch_meta = StoredMapFile {
            map: map.clone(),
            saved_at: Some(timestamp()),
        };
        self.write_json(&self.map_path(), &batch_meta)
    }

    fn load(&self) -> Result<Option<StoredBatch>> {
        if !self.map_path().exists() {
            return Ok(None);
        }
        let meta: StoredMapFile = self.read_json(&self.map_path())?;
        let identities: Vec<CanonicalIdentity> = self.read_json(&self.identities_path())?;
        Ok(Some(StoredBatch {
            identities,
            map: meta.map,
            saved_at: meta.saved_at,
        }))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredMapFile {
    map: RowMap,
    saved_at: Option<String>,
}

/// Current timestamp in ISO 8601 format.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdr_model::IdentityCandidate;

    fn temp_store_dir() -> PathBuf {
        let mut dir = std::env::temp_dir();
        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        dir.push(format!("pdr_resolve_store_{stamp}"));
        dir
    }

    fn sample_batch() -> (Vec<CanonicalIdentity>, RowMap) {
        let candidate = IdentityCandidate::new(7, "jane".into(), "smith".into());
        let identity = CanonicalIdentity {
            canonical_id: 1,
            candidate,
        };
        let mut map = RowMap::new();
        map.insert(7, 1);
        (vec![identity], map)
    }

    #[test]
    fn replace_then_load_round_trips() {
        let dir = temp_store_dir();
        let store = JsonFileStore::new(&dir).expect("store dir");
        let (identities, map) = sample_batch();

        store.replace_all(&identities, &map).expect("save batch");
        let batch = store.load().expect("load batch").expect("batch exists");
        assert_eq!(batch.identities.len(), 1);
        assert_eq!(batch.map.get(7), Some(1));
        let saved_at = batch.saved_at.expect("saved_at is recorded");
        assert!(chrono::DateTime::parse_from_rfc3339(&saved_at).is_ok());

        assert_eq!(store.get(7).expect("lookup"), Some(1));
        assert_eq!(store.get(99).expect("lookup"), None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_store_loads_none() {
        let dir = temp_store_dir();
        let store = JsonFileStore::new(&dir).expect("store dir");
        assert!(store.load().expect("load").is_none());
        let _ = fs::remove_dir_all(&dir);
    }
}
