//! The load/save façade over a store.
//!
//! Ties the pieces together: a [`RecordStore`] supplies document trees, the
//! version guard decodes them against the `Oil` schema, and encode writes
//! them back. One record per call; batch loops, retry, and skip policy stay
//! with the caller, which is expected to catch per record and continue.

use serde_json::Value;
use thiserror::Error;

use oildb_record::{encode, guard, LoadError, RecordNode, RecordValue};

use crate::model::{oil, CURRENT_VERSION};
use crate::store::{RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// A store plus the version-guarded codec for `Oil` records.
#[derive(Debug)]
pub struct Archive<S> {
    store: S,
}

impl<S: RecordStore> Archive<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Load and decode one record, arbitrating failures against its
    /// embedded version tag.
    pub fn load_oil(&self, id: &str) -> Result<RecordNode, ArchiveError> {
        let tree = self.store.load(id)?;
        match guard::load(&tree, oil(), CURRENT_VERSION) {
            Ok(node) => {
                tracing::debug!(oil_id = id, "loaded oil record");
                Ok(node)
            }
            Err(err) => {
                if let LoadError::Version {
                    document,
                    supported,
                    ..
                } = &err
                {
                    tracing::warn!(
                        oil_id = id,
                        document = %document,
                        supported = %supported,
                        "record written by a newer schema"
                    );
                }
                Err(err.into())
            }
        }
    }

    /// Encode and save one record, keyed by its `oil_id` field.
    pub fn save_oil(&mut self, node: &RecordNode, sparse: bool) -> Result<(), ArchiveError> {
        let id = node
            .get("oil_id")
            .and_then(RecordValue::as_str)
            .filter(|id| !id.is_empty())
            .ok_or(StoreError::MissingId)?
            .to_string();
        let tree: Value = encode(node, sparse);
        self.store.save(&id, &tree)?;
        tracing::debug!(oil_id = %id, sparse, "saved oil record");
        Ok(())
    }
}
