//! The schema-driven codec between record graphs and document trees.
//!
//! [`encode`] walks the node's schema in declared order and emits an ordered
//! mapping; [`decode`] walks the target schema and converts whatever the
//! tree holds, recursing through measurements, nested records, and lists.
//! `decode(encode(n, false)) == n` for every schema-conformant node.

use oildb_units::Measurement;
use serde_json::{Map, Value};

use crate::error::CodecError;
use crate::node::RecordNode;
use crate::schema::{FieldKind, RecordSchema};
use crate::value::RecordValue;

/// Encode a node into a document tree.
///
/// With `sparse` set, a field is omitted only when its current value equals
/// the field's declared default by value comparison — an explicit zero or
/// empty string set over a different default survives, while a never-touched
/// field drops out. List fields always encode: an empty list is an empty
/// sequence, never an omission, because "no items" and "field absent" are
/// different facts.
pub fn encode(node: &RecordNode, sparse: bool) -> Value {
    let mut map = Map::new();
    for (def, value) in node.schema().fields.iter().zip(node.values()) {
        if sparse && !matches!(def.kind, FieldKind::List(_)) && *value == def.default_value() {
            continue;
        }
        map.insert(def.name.to_string(), encode_value(value, sparse));
    }
    Value::Object(map)
}

fn encode_value(value: &RecordValue, sparse: bool) -> Value {
    match value {
        RecordValue::Null => Value::Null,
        RecordValue::Bool(b) => Value::Bool(*b),
        RecordValue::Int(i) => Value::from(*i),
        RecordValue::Float(f) => Value::from(*f),
        RecordValue::Str(s) => Value::String(s.clone()),
        RecordValue::Measurement(m) => encode_measurement(m),
        RecordValue::Record(node) => encode(node, sparse),
        RecordValue::List(items) => {
            Value::Array(items.iter().map(|v| encode_value(v, sparse)).collect())
        }
    }
}

/// Measurements encode as a mapping of their set members only, the way
/// historical documents carry them: `{"value": 904.0, "unit": "kg/m^3"}`.
pub fn encode_measurement(m: &Measurement) -> Value {
    let mut map = Map::new();
    if let Some(v) = m.value {
        map.insert("value".to_string(), Value::from(v));
    }
    if let Some(v) = m.min_value {
        map.insert("min_value".to_string(), Value::from(v));
    }
    if let Some(v) = m.max_value {
        map.insert("max_value".to_string(), Value::from(v));
    }
    if !m.unit.is_empty() {
        map.insert("unit".to_string(), Value::String(m.unit.clone()));
    }
    if let Some(t) = &m.unit_type {
        map.insert("unit_type".to_string(), Value::String(t.clone()));
    }
    if let Some(v) = m.standard_deviation {
        map.insert("standard_deviation".to_string(), Value::from(v));
    }
    if let Some(r) = m.replicates {
        map.insert("replicates".to_string(), Value::from(r));
    }
    Value::Object(map)
}

/// Decode a document tree into a node of `schema`'s type.
///
/// Fields absent from the tree take their declared defaults; mapping keys
/// the schema does not declare are ignored, so documents written by a newer,
/// additively changed schema still load. A value that cannot satisfy its
/// field's declared kind fails with the dotted field path.
pub fn decode(tree: &Value, schema: &'static RecordSchema) -> Result<RecordNode, CodecError> {
    decode_record(tree, schema, "")
}

fn decode_record(
    tree: &Value,
    schema: &'static RecordSchema,
    path: &str,
) -> Result<RecordNode, CodecError> {
    let map = tree.as_object().ok_or_else(|| {
        let shown = if path.is_empty() { schema.name } else { path };
        CodecError::field_type(shown, format!("`{}` mapping", schema.name), tree)
    })?;
    let mut values = Vec::with_capacity(schema.fields.len());
    for def in &schema.fields {
        match map.get(def.name) {
            None => values.push(def.default_value()),
            Some(v) => values.push(decode_value(v, &def.kind, &join(path, def.name))?),
        }
    }
    Ok(RecordNode::from_parts(schema, values))
}

fn decode_value(tree: &Value, kind: &FieldKind, path: &str) -> Result<RecordValue, CodecError> {
    // explicit null is always accepted as the unset value
    if tree.is_null() {
        return Ok(RecordValue::Null);
    }
    match *kind {
        FieldKind::Bool => tree
            .as_bool()
            .map(RecordValue::Bool)
            .ok_or_else(|| CodecError::field_type(path, "bool", tree)),
        FieldKind::Int => decode_int(tree)
            .map(RecordValue::Int)
            .ok_or_else(|| CodecError::field_type(path, "int", tree)),
        FieldKind::Float => tree
            .as_f64()
            .map(RecordValue::Float)
            .ok_or_else(|| CodecError::field_type(path, "float", tree)),
        FieldKind::Str => tree
            .as_str()
            .map(|s| RecordValue::Str(s.to_string()))
            .ok_or_else(|| CodecError::field_type(path, "string", tree)),
        FieldKind::Measurement => decode_measurement(tree, path).map(RecordValue::Measurement),
        FieldKind::Record(schema) => decode_record(tree, schema, path).map(RecordValue::Record),
        FieldKind::List(item) => {
            let arr = tree
                .as_array()
                .ok_or_else(|| CodecError::field_type(path, kind.describe(), tree))?;
            let mut items = Vec::with_capacity(arr.len());
            for (i, v) in arr.iter().enumerate() {
                items.push(decode_value(v, item, &format!("{path}.{i}"))?);
            }
            Ok(RecordValue::List(items))
        }
    }
}

/// Integer view of a tree number; floats qualify only when they carry no
/// fraction.
fn decode_int(tree: &Value) -> Option<i64> {
    if let Some(i) = tree.as_i64() {
        return Some(i);
    }
    match tree.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(f as i64),
        _ => None,
    }
}

fn decode_measurement(tree: &Value, path: &str) -> Result<Measurement, CodecError> {
    let map = tree
        .as_object()
        .ok_or_else(|| CodecError::field_type(path, "measurement mapping", tree))?;
    let mut m = Measurement {
        value: member_f64(map, "value", path)?,
        min_value: member_f64(map, "min_value", path)?,
        max_value: member_f64(map, "max_value", path)?,
        unit: String::new(),
        unit_type: None,
        standard_deviation: member_f64(map, "standard_deviation", path)?,
        replicates: None,
    };
    if let Some(unit) = member_str(map, "unit", path)? {
        m.unit = unit;
    }
    m.unit_type = member_str(map, "unit_type", path)?;
    if let Some(r) = member_f64(map, "replicates", path)? {
        if r.fract() != 0.0 || r < 0.0 {
            return Err(CodecError::field_type(
                &join(path, "replicates"),
                "replicate count",
                &map["replicates"],
            ));
        }
        m.replicates = Some(r as u32);
    }
    Ok(m)
}

fn member_f64(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<f64>, CodecError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| CodecError::field_type(&join(path, key), "number", v)),
    }
}

fn member_str(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<String>, CodecError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| CodecError::field_type(&join(path, key), "string", v)),
    }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDef, FieldKind, RecordSchema};
    use serde_json::json;
    use std::sync::OnceLock;

    fn leak(schema: RecordSchema) -> &'static RecordSchema {
        Box::leak(Box::new(schema))
    }

    fn reading_schema() -> &'static RecordSchema {
        static SCHEMA: OnceLock<&'static RecordSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            leak(RecordSchema::new(
                "Reading",
                vec![
                    FieldDef::measurement("density"),
                    FieldDef::str("method"),
                ],
            ))
        })
    }

    fn report_schema() -> &'static RecordSchema {
        static SCHEMA: OnceLock<&'static RecordSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            leak(RecordSchema::new(
                "Report",
                vec![
                    FieldDef::str("report_id"),
                    FieldDef::str_with_default("status", "draft"),
                    FieldDef::nullable_int("year"),
                    FieldDef::list("readings", FieldKind::Record(reading_schema())),
                    FieldDef::str_list("labels"),
                ],
            ))
        })
    }

    fn sample_report() -> RecordNode {
        let mut node = report_schema().default_node();
        node.set("report_id", "R-100").unwrap();
        node.set("year", 1999i64).unwrap();
        let mut reading = reading_schema().default_node();
        reading
            .set(
                "density",
                oildb_units::Measurement::point(904.0, "kg/m^3"),
            )
            .unwrap();
        reading.set("method", "ASTM D4052").unwrap();
        node.set(
            "readings",
            vec![RecordValue::Record(reading)],
        )
        .unwrap();
        node.set(
            "labels",
            vec![RecordValue::from("crude"), RecordValue::from("heavy")],
        )
        .unwrap();
        node
    }

    // -- Encode --

    #[test]
    fn full_encode_emits_every_field_in_schema_order() {
        let tree = encode(&sample_report(), false);
        let keys: Vec<&str> = tree.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["report_id", "status", "year", "readings", "labels"]);
    }

    #[test]
    fn sparse_encode_omits_only_defaults() {
        let mut node = report_schema().default_node();
        node.set("report_id", "R-1").unwrap();
        // status stays at its declared default "draft" and is omitted;
        // an explicit empty string is not the default and survives
        let tree = encode(&node, true);
        let map = tree.as_object().unwrap();
        assert!(map.contains_key("report_id"));
        assert!(!map.contains_key("status"));
        assert!(!map.contains_key("year"));

        node.set("status", "").unwrap();
        let tree = encode(&node, true);
        assert_eq!(tree.as_object().unwrap()["status"], json!(""));
    }

    #[test]
    fn sparse_encode_always_emits_lists() {
        let tree = encode(&report_schema().default_node(), true);
        let map = tree.as_object().unwrap();
        assert_eq!(map["readings"], json!([]));
        assert_eq!(map["labels"], json!([]));
    }

    #[test]
    fn measurement_encodes_set_members_only() {
        let tree = encode_measurement(&Measurement::point(904.0, "kg/m^3"));
        assert_eq!(tree, json!({"value": 904.0, "unit": "kg/m^3"}));
    }

    // -- Decode --

    #[test]
    fn decode_fills_absent_fields_with_defaults() {
        let node = decode(&json!({"report_id": "R-2"}), report_schema()).unwrap();
        assert_eq!(node.get("status").unwrap().as_str(), Some("draft"));
        assert_eq!(node.get("year"), Some(&RecordValue::Null));
        assert_eq!(node.get("readings"), Some(&RecordValue::List(Vec::new())));
    }

    #[test]
    fn decode_ignores_undeclared_keys() {
        let node = decode(
            &json!({"report_id": "R-3", "added_in_a_newer_schema": {"x": 1}}),
            report_schema(),
        )
        .unwrap();
        assert_eq!(node.get("report_id").unwrap().as_str(), Some("R-3"));
    }

    #[test]
    fn decode_widens_numbers_both_ways() {
        let schema: &'static RecordSchema = {
            static SCHEMA: OnceLock<&'static RecordSchema> = OnceLock::new();
            SCHEMA.get_or_init(|| {
                leak(RecordSchema::new(
                    "Nums",
                    vec![FieldDef::nullable_int("n"), FieldDef::nullable_float("x")],
                ))
            })
        };
        let node = decode(&json!({"n": 3.0, "x": 7}), schema).unwrap();
        assert_eq!(node.get("n"), Some(&RecordValue::Int(3)));
        assert_eq!(node.get("x"), Some(&RecordValue::Float(7.0)));
    }

    #[test]
    fn decode_type_errors_carry_dotted_paths() {
        let err = decode(
            &json!({"readings": [{"density": {"value": "dense"}}]}),
            report_schema(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CodecError::FieldType {
                path: "readings.0.density.value".to_string(),
                expected: "number".to_string(),
                found: "string".to_string(),
            }
        );

        let err = decode(&json!({"labels": "crude"}), report_schema()).unwrap_err();
        match err {
            CodecError::FieldType { path, .. } => assert_eq!(path, "labels"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_non_mapping_root() {
        let err = decode(&json!([1, 2, 3]), report_schema()).unwrap_err();
        match err {
            CodecError::FieldType { path, .. } => assert_eq!(path, "Report"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // -- Round trip --

    #[test]
    fn full_round_trip_is_identity() {
        let node = sample_report();
        let back = decode(&encode(&node, false), report_schema()).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn sparse_round_trip_restores_defaults() {
        let node = sample_report();
        let sparse = encode(&node, true);
        let full = encode(&node, false);
        let sparse_keys: Vec<&String> = sparse.as_object().unwrap().keys().collect();
        for key in &sparse_keys {
            assert!(full.as_object().unwrap().contains_key(key.as_str()));
        }
        let back = decode(&sparse, report_schema()).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn explicit_null_survives_a_round_trip() {
        let mut node = sample_report();
        node.set("report_id", RecordValue::Null).unwrap();
        let back = decode(&encode(&node, false), report_schema()).unwrap();
        assert_eq!(back, node);
    }
}
