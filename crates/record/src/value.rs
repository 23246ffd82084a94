//! The runtime value of one record field.

use oildb_units::Measurement;

use crate::node::RecordNode;

/// One field's value inside a typed record graph.
///
/// The graph is a plain value tree: no sharing, no back-references, no
/// cycles. Cloning a value clones the whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Measurement(Measurement),
    Record(RecordNode),
    List(Vec<RecordValue>),
}

impl RecordValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            RecordValue::Null => "null",
            RecordValue::Bool(_) => "bool",
            RecordValue::Int(_) => "int",
            RecordValue::Float(_) => "float",
            RecordValue::Str(_) => "str",
            RecordValue::Measurement(_) => "measurement",
            RecordValue::Record(_) => "record",
            RecordValue::List(_) => "list",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RecordValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            RecordValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            RecordValue::Float(f) => Some(*f),
            RecordValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RecordValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_measurement(&self) -> Option<&Measurement> {
        match self {
            RecordValue::Measurement(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordNode> {
        match self {
            RecordValue::Record(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RecordValue]> {
        match self {
            RecordValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for RecordValue {
    fn from(b: bool) -> Self {
        RecordValue::Bool(b)
    }
}

impl From<i64> for RecordValue {
    fn from(i: i64) -> Self {
        RecordValue::Int(i)
    }
}

impl From<f64> for RecordValue {
    fn from(f: f64) -> Self {
        RecordValue::Float(f)
    }
}

impl From<&str> for RecordValue {
    fn from(s: &str) -> Self {
        RecordValue::Str(s.to_string())
    }
}

impl From<String> for RecordValue {
    fn from(s: String) -> Self {
        RecordValue::Str(s)
    }
}

impl From<Measurement> for RecordValue {
    fn from(m: Measurement) -> Self {
        RecordValue::Measurement(m)
    }
}

impl From<RecordNode> for RecordValue {
    fn from(n: RecordNode) -> Self {
        RecordValue::Record(n)
    }
}

impl From<Vec<RecordValue>> for RecordValue {
    fn from(items: Vec<RecordValue>) -> Self {
        RecordValue::List(items)
    }
}
