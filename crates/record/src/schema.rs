//! Static per-type field schemas.
//!
//! A [`RecordSchema`] is the single place a record type's shape is declared:
//! an ordered list of fields with a declared kind and default. Schemas are
//! built once at process start (typically inside a `OnceLock` initializer),
//! leaked to `'static`, and treated as read-only shared state from then on.
//! The schema graph is a tree — no type is its own ancestor — so nested
//! types are plain static references, with no name-based indirection.

use oildb_units::Measurement;

use crate::node::RecordNode;
use crate::value::RecordValue;

/// The declared type of one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    Str,
    Measurement,
    Record(&'static RecordSchema),
    List(&'static FieldKind),
}

impl FieldKind {
    /// A homogeneous list of `item`. Leaks the item kind; kinds are built
    /// once per process alongside their schemas.
    pub fn list_of(item: FieldKind) -> FieldKind {
        FieldKind::List(Box::leak(Box::new(item)))
    }

    /// Human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match *self {
            FieldKind::Bool => "bool".to_string(),
            FieldKind::Int => "int".to_string(),
            FieldKind::Float => "float".to_string(),
            FieldKind::Str => "string".to_string(),
            FieldKind::Measurement => "measurement mapping".to_string(),
            FieldKind::Record(schema) => format!("`{}` mapping", schema.name),
            FieldKind::List(item) => format!("sequence of {}", item.describe()),
        }
    }

    /// The value a freshly created slot of this kind holds, used when a list
    /// element is appended without content.
    pub fn default_value(&self) -> RecordValue {
        match *self {
            FieldKind::Bool => RecordValue::Bool(false),
            FieldKind::Int => RecordValue::Int(0),
            FieldKind::Float => RecordValue::Float(0.0),
            FieldKind::Str => RecordValue::Str(String::new()),
            FieldKind::Measurement => RecordValue::Measurement(Measurement::default()),
            FieldKind::Record(schema) => RecordValue::Record(schema.default_node()),
            FieldKind::List(_) => RecordValue::List(Vec::new()),
        }
    }
}

/// The declared default of a scalar field. Non-scalar kinds derive their
/// default from the kind itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'static str),
}

impl FieldDefault {
    fn to_value(self) -> RecordValue {
        match self {
            FieldDefault::Null => RecordValue::Null,
            FieldDefault::Bool(b) => RecordValue::Bool(b),
            FieldDefault::Int(i) => RecordValue::Int(i),
            FieldDefault::Float(f) => RecordValue::Float(f),
            FieldDefault::Str(s) => RecordValue::Str(s.to_string()),
        }
    }
}

/// One declared field: name, kind, default.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: FieldDefault,
}

impl FieldDef {
    pub fn new(name: &'static str, kind: FieldKind, default: FieldDefault) -> Self {
        Self {
            name,
            kind,
            default,
        }
    }

    /// String field defaulting to the empty string.
    pub fn str(name: &'static str) -> Self {
        Self::new(name, FieldKind::Str, FieldDefault::Str(""))
    }

    /// String field with a declared default.
    pub fn str_with_default(name: &'static str, default: &'static str) -> Self {
        Self::new(name, FieldKind::Str, FieldDefault::Str(default))
    }

    /// Integer field that is simply absent until set.
    pub fn nullable_int(name: &'static str) -> Self {
        Self::new(name, FieldKind::Int, FieldDefault::Null)
    }

    /// Float field that is simply absent until set.
    pub fn nullable_float(name: &'static str) -> Self {
        Self::new(name, FieldKind::Float, FieldDefault::Null)
    }

    pub fn bool(name: &'static str) -> Self {
        Self::new(name, FieldKind::Bool, FieldDefault::Bool(false))
    }

    pub fn measurement(name: &'static str) -> Self {
        Self::new(name, FieldKind::Measurement, FieldDefault::Null)
    }

    pub fn record(name: &'static str, schema: &'static RecordSchema) -> Self {
        Self::new(name, FieldKind::Record(schema), FieldDefault::Null)
    }

    pub fn list(name: &'static str, item: FieldKind) -> Self {
        Self::new(name, FieldKind::list_of(item), FieldDefault::Null)
    }

    pub fn str_list(name: &'static str) -> Self {
        Self::list(name, FieldKind::Str)
    }

    /// The value this field holds in a default-constructed node.
    pub fn default_value(&self) -> RecordValue {
        match self.kind {
            FieldKind::Measurement | FieldKind::Record(_) | FieldKind::List(_) => {
                self.kind.default_value()
            }
            _ => self.default.to_value(),
        }
    }
}

/// The static field schema of one record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub name: &'static str,
    pub fields: Vec<FieldDef>,
}

impl RecordSchema {
    pub fn new(name: &'static str, fields: Vec<FieldDef>) -> Self {
        Self { name, fields }
    }

    /// Position and definition of a declared field.
    pub fn field(&self, name: &str) -> Option<(usize, &FieldDef)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, def)| def.name == name)
    }

    /// A node of this type with every field at its declared default.
    pub fn default_node(&'static self) -> RecordNode {
        RecordNode::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_schema() -> &'static RecordSchema {
        static SCHEMA: std::sync::OnceLock<&'static RecordSchema> = std::sync::OnceLock::new();
        SCHEMA.get_or_init(|| {
            Box::leak(Box::new(RecordSchema::new(
                "Point",
                vec![
                    FieldDef::str("label"),
                    FieldDef::nullable_float("x"),
                    FieldDef::measurement("reading"),
                    FieldDef::str_list("tags"),
                ],
            )))
        })
    }

    #[test]
    fn field_lookup_preserves_declared_order() {
        let schema = point_schema();
        assert_eq!(schema.field("label").unwrap().0, 0);
        assert_eq!(schema.field("tags").unwrap().0, 3);
        assert!(schema.field("unknown").is_none());
    }

    #[test]
    fn defaults_by_kind() {
        let schema = point_schema();
        let node = schema.default_node();
        assert_eq!(node.get("label"), Some(&RecordValue::Str(String::new())));
        assert_eq!(node.get("x"), Some(&RecordValue::Null));
        assert_eq!(
            node.get("reading"),
            Some(&RecordValue::Measurement(Default::default()))
        );
        assert_eq!(node.get("tags"), Some(&RecordValue::List(Vec::new())));
    }

    #[test]
    fn list_item_defaults() {
        assert_eq!(FieldKind::Str.default_value(), RecordValue::Str(String::new()));
        assert_eq!(FieldKind::Int.default_value(), RecordValue::Int(0));
        let nested = FieldKind::Record(point_schema()).default_value();
        assert_eq!(nested.as_record().unwrap().type_name(), "Point");
    }
}
