//! Typed record graphs and the schema-driven tree codec.
//!
//! Every record type declares a static, ordered field schema
//! ([`RecordSchema`]) built once per process; the codec walks that schema to
//! [`encode`] a [`RecordNode`] into a generic document tree
//! (`serde_json::Value`) and to [`decode`] one back. [`guard::load`] wraps
//! decoding with the version arbitration applied to documents arriving from
//! storage.

mod codec;
mod error;
pub mod guard;
mod node;
mod schema;
mod value;

pub use codec::{decode, encode, encode_measurement};
pub use error::CodecError;
pub use guard::{load, LoadError};
pub use node::RecordNode;
pub use schema::{FieldDef, FieldDefault, FieldKind, RecordSchema};
pub use value::RecordValue;
