//! Unit-aware measurement values.
//!
//! A [`Measurement`] is either a point (`value` set) or a range (at least one
//! of `min_value`/`max_value` set), always in the same representation. Its
//! `unit` names a member of one of the process-wide unit families held in the
//! [`registry`](crate::registry::registry) table, and [`Measurement::convert`]
//! rewrites a measurement into any other unit of the same family.

mod error;
mod measurement;
pub mod registry;

pub use error::UnitError;
pub use measurement::{min_max, Measurement};
pub use registry::{
    kelvin_offset, registry, set_kelvin_offset, Conversion, KelvinOffset, UnitDef, UnitFamily,
    UnitRegistry,
};
