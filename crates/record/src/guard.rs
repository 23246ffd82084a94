//! Load-time version arbitration.
//!
//! Decode is attempted unconditionally — the codec already tolerates
//! additive schema drift, so a newer-but-compatible document loads
//! transparently, version tag untouched. Only when decode fails does the
//! embedded tag matter: a strictly newer document turns the failure into a
//! [`LoadError::Version`], anything else propagates the decode failure
//! unchanged. A newer tag alone is never grounds for rejection.

use oildb_version::Version;
use serde_json::Value;
use thiserror::Error;

use crate::codec::decode;
use crate::error::CodecError;
use crate::node::RecordNode;
use crate::schema::RecordSchema;

/// Root mapping key holding the document's embedded version tag.
pub const VERSION_FIELD: &str = "schema_version";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    /// Decode failed and the document was written by a newer schema than the
    /// running code knows; the underlying failure is kept as the source.
    #[error("document schema version {document} is newer than supported {supported}: {source}")]
    Version {
        document: Version,
        supported: Version,
        source: CodecError,
    },
    #[error(transparent)]
    Decode(#[from] CodecError),
}

/// Decode `tree` as a `schema` record, arbitrating failures against the
/// document's embedded version tag.
pub fn load(
    tree: &Value,
    schema: &'static RecordSchema,
    supported: Version,
) -> Result<RecordNode, LoadError> {
    let err = match decode(tree, schema) {
        Ok(node) => return Ok(node),
        Err(err) => err,
    };
    let document = tree
        .get(VERSION_FIELD)
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Version>().ok());
    match document {
        Some(document) if document > supported => Err(LoadError::Version {
            document,
            supported,
            source: err,
        }),
        _ => Err(LoadError::Decode(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDef, RecordSchema};
    use serde_json::json;
    use std::sync::OnceLock;

    fn doc_schema() -> &'static RecordSchema {
        static SCHEMA: OnceLock<&'static RecordSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Box::leak(Box::new(RecordSchema::new(
                "Doc",
                vec![
                    FieldDef::str("doc_id"),
                    FieldDef::str("schema_version"),
                    FieldDef::nullable_float("reading"),
                ],
            )))
        })
    }

    const SUPPORTED: Version = Version::new(1, 0, 0);

    #[test]
    fn compatible_newer_document_loads_with_tag_untouched() {
        let tree = json!({"doc_id": "D1", "schema_version": "9.9.9", "reading": 1.5});
        let node = load(&tree, doc_schema(), SUPPORTED).unwrap();
        assert_eq!(node.get("schema_version").unwrap().as_str(), Some("9.9.9"));
    }

    #[test]
    fn incompatible_newer_document_is_a_version_error() {
        let tree = json!({"doc_id": "D2", "schema_version": "9.9.9", "reading": {"v": 1.5}});
        let err = load(&tree, doc_schema(), SUPPORTED).unwrap_err();
        match err {
            LoadError::Version {
                document,
                supported,
                source,
            } => {
                assert_eq!(document, Version::new(9, 9, 9));
                assert_eq!(supported, SUPPORTED);
                assert!(matches!(source, CodecError::FieldType { ref path, .. } if path == "reading"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn incompatible_older_document_keeps_the_decode_error() {
        let tree = json!({"doc_id": "D3", "schema_version": "0.1.0", "reading": "high"});
        let err = load(&tree, doc_schema(), SUPPORTED).unwrap_err();
        assert!(matches!(err, LoadError::Decode(CodecError::FieldType { ref path, .. }) if path == "reading"));
    }

    #[test]
    fn missing_or_garbled_tag_keeps_the_decode_error() {
        let no_tag = json!({"doc_id": "D4", "reading": "high"});
        assert!(matches!(
            load(&no_tag, doc_schema(), SUPPORTED).unwrap_err(),
            LoadError::Decode(_)
        ));
        let bad_tag = json!({"doc_id": "D5", "schema_version": "new", "reading": "high"});
        assert!(matches!(
            load(&bad_tag, doc_schema(), SUPPORTED).unwrap_err(),
            LoadError::Decode(_)
        ));
    }
}
