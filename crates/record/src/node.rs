//! A typed record graph node.

use crate::error::CodecError;
use crate::schema::{FieldDef, RecordSchema};
use crate::value::RecordValue;

/// One node of a typed record graph: a static schema plus the field values,
/// stored positionally in schema order.
///
/// Nodes are exclusively owned plain values — mutate in place, clone to
/// copy, drop to destroy. All shape questions go through the schema.
#[derive(Debug, Clone)]
pub struct RecordNode {
    schema: &'static RecordSchema,
    values: Vec<RecordValue>,
}

impl RecordNode {
    /// A node with every field at its declared default.
    pub fn new(schema: &'static RecordSchema) -> Self {
        Self {
            schema,
            values: schema.fields.iter().map(FieldDef::default_value).collect(),
        }
    }

    /// A node from an explicit field set. Every name must be declared by the
    /// schema; unknown names fail rather than being silently dropped. Fields
    /// not named keep their defaults.
    pub fn from_fields<I, S>(schema: &'static RecordSchema, fields: I) -> Result<Self, CodecError>
    where
        I: IntoIterator<Item = (S, RecordValue)>,
        S: AsRef<str>,
    {
        let mut node = Self::new(schema);
        for (name, value) in fields {
            node.set(name.as_ref(), value)?;
        }
        Ok(node)
    }

    pub(crate) fn from_parts(schema: &'static RecordSchema, values: Vec<RecordValue>) -> Self {
        debug_assert_eq!(schema.fields.len(), values.len());
        Self { schema, values }
    }

    pub fn schema(&self) -> &'static RecordSchema {
        self.schema
    }

    pub fn type_name(&self) -> &'static str {
        self.schema.name
    }

    pub fn get(&self, field: &str) -> Option<&RecordValue> {
        let (idx, _) = self.schema.field(field)?;
        Some(&self.values[idx])
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut RecordValue> {
        let (idx, _) = self.schema.field(field)?;
        Some(&mut self.values[idx])
    }

    /// Definition and mutable value slot of a declared field.
    pub fn entry_mut(&mut self, field: &str) -> Option<(&'static FieldDef, &mut RecordValue)> {
        let schema: &'static RecordSchema = self.schema;
        let (idx, def) = schema.field(field)?;
        Some((def, &mut self.values[idx]))
    }

    /// Assign a declared field; unknown names fail.
    pub fn set(&mut self, field: &str, value: impl Into<RecordValue>) -> Result<(), CodecError> {
        match self.get_mut(field) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(CodecError::UnknownField {
                type_name: self.schema.name,
                field: field.to_string(),
            }),
        }
    }

    /// Field values in schema order.
    pub fn values(&self) -> &[RecordValue] {
        &self.values
    }
}

/// Schemas are process singletons, so node equality is pointer identity on
/// the schema plus value equality field by field.
impl PartialEq for RecordNode {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.values == other.values
    }
}
