//! Version arbitration scenarios against the full `Oil` schema.

use oildb::{guard, model, CodecError, LoadError, Version, CURRENT_VERSION};
use serde_json::{json, Value};

fn oil_tree(version: &str) -> Value {
    json!({
        "oil_id": "AD00017",
        "schema_version": version,
        "metadata": {
            "name": "Alberta Sweet Mixed Blend",
            "source_id": "ESTS-2000",
            "location": "Alberta, Canada",
            "product_type": "Crude Oil NOS",
            "api": 35.4,
            "labels": ["crude"],
            "reference": {"year": 1999, "reference": "Environment Canada oil catalogue"}
        },
        "status": ["reviewed"],
        "sub_samples": [
            {
                "metadata": {"sample_id": "S0", "name": "Fresh Oil Sample", "short_name": "Fresh"},
                "physical_properties": {
                    "pour_point": {"min_value": -30.0, "max_value": -25.0, "unit": "C"},
                    "densities": [
                        {
                            "density": {"value": 846.9, "unit": "kg/m^3"},
                            "ref_temp": {"value": 15.0, "unit": "C"},
                            "method": "ASTM D4052"
                        }
                    ]
                }
            }
        ]
    })
}

#[test]
fn compatible_newer_document_loads_with_version_untouched() {
    let tree = oil_tree("9.9.9");
    let node = guard::load(&tree, model::oil(), CURRENT_VERSION).unwrap();
    assert_eq!(node.get("schema_version").unwrap().as_str(), Some("9.9.9"));
    assert_eq!(node.get("oil_id").unwrap().as_str(), Some("AD00017"));
}

#[test]
fn extra_fields_from_a_newer_schema_are_ignored() {
    let mut tree = oil_tree("9.9.9");
    tree.as_object_mut()
        .unwrap()
        .insert("added_in_v9".to_string(), json!({"anything": true}));
    assert!(guard::load(&tree, model::oil(), CURRENT_VERSION).is_ok());
}

#[test]
fn incompatible_newer_document_raises_version_error() {
    let mut tree = oil_tree("9.9.9");
    // a v9 writer reshaped sub_samples into a mapping
    tree.as_object_mut()
        .unwrap()
        .insert("sub_samples".to_string(), json!({"fresh": {}}));
    let err = guard::load(&tree, model::oil(), CURRENT_VERSION).unwrap_err();
    match err {
        LoadError::Version {
            document,
            supported,
            source,
        } => {
            assert_eq!(document, Version::new(9, 9, 9));
            assert_eq!(supported, CURRENT_VERSION);
            assert!(matches!(source, CodecError::FieldType { ref path, .. } if path == "sub_samples"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn incompatible_older_document_keeps_the_field_error() {
    let mut tree = oil_tree("0.1.0");
    tree.as_object_mut()
        .unwrap()
        .insert("sub_samples".to_string(), json!({"fresh": {}}));
    let err = guard::load(&tree, model::oil(), CURRENT_VERSION).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Decode(CodecError::FieldType { ref path, .. }) if path == "sub_samples"
    ));
}

#[test]
fn nested_field_errors_carry_the_full_dotted_path() {
    let mut tree = oil_tree("0.1.0");
    tree["sub_samples"][0]["physical_properties"]["densities"][0]["density"] =
        json!({"value": "heavy"});
    let err = guard::load(&tree, model::oil(), CURRENT_VERSION).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Decode(CodecError::FieldType { ref path, .. })
            if path == "sub_samples.0.physical_properties.densities.0.density.value"
    ));
}
