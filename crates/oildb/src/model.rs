//! The oil record schemas.
//!
//! One `RecordSchema` per record type, built once per process and shared
//! read-only. The `Oil` root embeds its identity (`oil_id`) and a
//! `schema_version` tag as ordinary fields; sub-samples nest physical
//! property measurement series beneath it.

use std::sync::OnceLock;

use oildb_record::{FieldDef, FieldKind, RecordNode, RecordSchema};
use oildb_version::Version;

/// The schema version this build of the code writes and supports.
pub const CURRENT_VERSION: Version = Version::new(0, 14, 0);
pub const CURRENT_VERSION_STR: &str = "0.14.0";

fn leak(schema: RecordSchema) -> &'static RecordSchema {
    Box::leak(Box::new(schema))
}

pub fn reference() -> &'static RecordSchema {
    static SCHEMA: OnceLock<&'static RecordSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        leak(RecordSchema::new(
            "Reference",
            vec![FieldDef::nullable_int("year"), FieldDef::str("reference")],
        ))
    })
}

pub fn oil_metadata() -> &'static RecordSchema {
    static SCHEMA: OnceLock<&'static RecordSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        leak(RecordSchema::new(
            "OilMetadata",
            vec![
                FieldDef::str("name"),
                FieldDef::str("source_id"),
                FieldDef::str("location"),
                FieldDef::str("product_type"),
                FieldDef::nullable_float("api"),
                FieldDef::str("comments"),
                FieldDef::str_list("labels"),
                FieldDef::record("reference", reference()),
            ],
        ))
    })
}

pub fn sample_metadata() -> &'static RecordSchema {
    static SCHEMA: OnceLock<&'static RecordSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        leak(RecordSchema::new(
            "SampleMetadata",
            vec![
                FieldDef::str("sample_id"),
                FieldDef::str("name"),
                FieldDef::str("short_name"),
                FieldDef::measurement("fraction_evaporated"),
                FieldDef::measurement("boiling_point_range"),
            ],
        ))
    })
}

pub fn density_point() -> &'static RecordSchema {
    static SCHEMA: OnceLock<&'static RecordSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        leak(RecordSchema::new(
            "DensityPoint",
            vec![
                FieldDef::measurement("density"),
                FieldDef::measurement("ref_temp"),
                FieldDef::str("method"),
            ],
        ))
    })
}

pub fn dynamic_viscosity_point() -> &'static RecordSchema {
    static SCHEMA: OnceLock<&'static RecordSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        leak(RecordSchema::new(
            "DynamicViscosityPoint",
            vec![
                FieldDef::measurement("viscosity"),
                FieldDef::measurement("ref_temp"),
                FieldDef::measurement("shear_rate"),
                FieldDef::str("method"),
            ],
        ))
    })
}

pub fn interfacial_tension_point() -> &'static RecordSchema {
    static SCHEMA: OnceLock<&'static RecordSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        leak(RecordSchema::new(
            "InterfacialTensionPoint",
            vec![
                FieldDef::measurement("tension"),
                FieldDef::measurement("ref_temp"),
                FieldDef::str("interface"),
                FieldDef::str("method"),
            ],
        ))
    })
}

pub fn physical_properties() -> &'static RecordSchema {
    static SCHEMA: OnceLock<&'static RecordSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        leak(RecordSchema::new(
            "PhysicalProperties",
            vec![
                FieldDef::measurement("pour_point"),
                FieldDef::measurement("flash_point"),
                FieldDef::list("densities", FieldKind::Record(density_point())),
                FieldDef::list(
                    "dynamic_viscosities",
                    FieldKind::Record(dynamic_viscosity_point()),
                ),
                FieldDef::list(
                    "interfacial_tensions",
                    FieldKind::Record(interfacial_tension_point()),
                ),
            ],
        ))
    })
}

pub fn compound() -> &'static RecordSchema {
    static SCHEMA: OnceLock<&'static RecordSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        leak(RecordSchema::new(
            "Compound",
            vec![
                FieldDef::str("name"),
                FieldDef::measurement("fraction"),
                FieldDef::str("method"),
            ],
        ))
    })
}

pub fn sub_sample() -> &'static RecordSchema {
    static SCHEMA: OnceLock<&'static RecordSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        leak(RecordSchema::new(
            "SubSample",
            vec![
                FieldDef::record("metadata", sample_metadata()),
                FieldDef::record("physical_properties", physical_properties()),
                FieldDef::list("bulk_composition", FieldKind::Record(compound())),
            ],
        ))
    })
}

pub fn oil() -> &'static RecordSchema {
    static SCHEMA: OnceLock<&'static RecordSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        leak(RecordSchema::new(
            "Oil",
            vec![
                FieldDef::str("oil_id"),
                FieldDef::str_with_default("schema_version", CURRENT_VERSION_STR),
                FieldDef::record("metadata", oil_metadata()),
                FieldDef::str_list("status"),
                FieldDef::list("sub_samples", FieldKind::Record(sub_sample())),
            ],
        ))
    })
}

/// A fresh root record with identity and version stamped.
pub fn new_oil(oil_id: &str) -> RecordNode {
    let mut node = oil().default_node();
    // oil_id is a declared field, the set cannot fail
    let _ = node.set("oil_id", oil_id);
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_version_constants_agree() {
        assert_eq!(
            CURRENT_VERSION_STR.parse::<Version>().unwrap(),
            CURRENT_VERSION
        );
    }

    #[test]
    fn new_oil_stamps_identity_and_version() {
        let node = new_oil("AD00017");
        assert_eq!(node.get("oil_id").unwrap().as_str(), Some("AD00017"));
        assert_eq!(
            node.get("schema_version").unwrap().as_str(),
            Some(CURRENT_VERSION_STR)
        );
        assert_eq!(node.type_name(), "Oil");
    }

    #[test]
    fn schema_nesting_reaches_measurement_series() {
        let schema = oil();
        let (_, sub_samples) = schema.field("sub_samples").unwrap();
        match sub_samples.kind {
            FieldKind::List(item) => match item {
                FieldKind::Record(s) => assert_eq!(s.name, "SubSample"),
                other => panic!("unexpected item kind: {other:?}"),
            },
            ref other => panic!("unexpected kind: {other:?}"),
        }
        assert!(physical_properties().field("densities").is_some());
    }
}
