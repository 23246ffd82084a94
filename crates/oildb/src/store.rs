//! The storage collaborator contract and two reference stores.
//!
//! A store moves whole document trees in and out by identifier; it knows
//! nothing about schemas, versions, or the typed graph. Anything that can
//! hold bytes qualifies — the engine never depends on which backend sits
//! behind the trait.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record `{0}` not found")]
    NotFound(String),
    #[error("record has no identity field")]
    MissingId,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

/// Load/save of one document tree per logical record.
pub trait RecordStore {
    fn load(&self, id: &str) -> Result<Value, StoreError>;
    fn save(&mut self, id: &str, tree: &Value) -> Result<(), StoreError>;
}

/// In-memory store, ordered by identifier. Useful for tests and for batch
/// tooling that stages records before a real backend sees them.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stored identifiers in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Value, StoreError> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn save(&mut self, id: &str, tree: &Value) -> Result<(), StoreError> {
        self.records.insert(id.to_string(), tree.clone());
        Ok(())
    }
}

/// One pretty-printed `<id>.json` file per record under a directory.
#[derive(Debug)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl RecordStore for DirStore {
    fn load(&self, id: &str) -> Result<Value, StoreError> {
        let path = self.record_path(id);
        let text = fs::read_to_string(&path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound(id.to_string())
            } else {
                StoreError::Io(err)
            }
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&mut self, id: &str, tree: &Value) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let text = serde_json::to_string_pretty(tree)?;
        fs::write(self.record_path(id), text)?;
        Ok(())
    }
}
