//! Unit lookup and conversion error type.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("unknown unit `{unit}`")]
    UnknownUnit { unit: String },
    #[error("unknown unit family `{0}`")]
    UnknownFamily(String),
    #[error("unit `{unit}` does not belong to the `{family}` family")]
    FamilyMismatch { unit: String, family: String },
}
