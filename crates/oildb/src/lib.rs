//! Versioned, typed, round-trip-safe storage of oil characterization
//! records.
//!
//! The engine lives in the member crates and is re-exported here:
//!
//! - `oildb-units` — unit-aware [`Measurement`] values and conversion
//! - `oildb-version` — ordered [`Version`] tags
//! - `oildb-record` — typed record graphs, the schema-driven codec, and the
//!   load-time version guard
//! - `oildb-path` — dot-path [`get`]/[`set`] over record graphs
//!
//! This crate adds the concrete oil record schemas ([`model`]), the storage
//! collaborator contract ([`store`]), and the [`archive`] façade tying them
//! together.

pub mod archive;
pub mod model;
pub mod store;

pub use archive::{Archive, ArchiveError};
pub use model::{new_oil, CURRENT_VERSION, CURRENT_VERSION_STR};
pub use store::{DirStore, MemoryStore, RecordStore, StoreError};

pub use oildb_path::{get, parse_path, set, PathError, PathToken};
pub use oildb_record::{
    decode, encode, guard, CodecError, FieldDef, FieldDefault, FieldKind, LoadError, RecordNode,
    RecordSchema, RecordValue,
};
pub use oildb_units::{
    min_max, registry, set_kelvin_offset, KelvinOffset, Measurement, UnitError,
};
pub use oildb_version::{Version, VersionParseError};
