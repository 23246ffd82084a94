//! Codec error type.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A tree value that cannot satisfy its field's declared type. `path` is
    /// the dotted field path from the root record, list indices included.
    #[error("field `{path}`: expected {expected}, found {found}")]
    FieldType {
        path: String,
        expected: String,
        found: String,
    },
    /// An explicitly constructed field set named a field the schema does not
    /// declare. Unknown keys are never silently dropped.
    #[error("unknown field `{field}` on `{type_name}`")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },
}

impl CodecError {
    pub(crate) fn field_type(path: &str, expected: impl Into<String>, found: &Value) -> Self {
        CodecError::FieldType {
            path: path.to_string(),
            expected: expected.into(),
            found: tree_kind(found).to_string(),
        }
    }
}

/// The shape of a tree value, for diagnostics.
pub(crate) fn tree_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
