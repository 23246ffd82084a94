//! Dot-path navigation over typed record graphs.
//!
//! A path is a `.`-delimited token sequence; each token is a schema field
//! name, a possibly negative list index, or the literal `+`. This is the one
//! surface exposed to loosely-typed external scripting: any field of any
//! record shape is addressable without per-field code.
//!
//! `sub_samples.0.metadata.sample_id` — field of the first list element.
//! `physical_properties.densities.-1` — last element, counted from the end.
//! `physical_properties.densities.+` — append a fresh element and select it.
//!
//! Measurements are leaves here: a path selects a whole measurement, never
//! one of its members. `+` only makes sense while writing, so [`get`]
//! rejects it.

use thiserror::Error;

use oildb_record::{FieldKind, RecordNode, RecordValue};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path")]
    Empty,
    #[error("empty token in path `{0}`")]
    EmptyToken(String),
    #[error("unknown field `{field}` on `{type_name}`")]
    UnknownField { type_name: String, field: String },
    #[error("expected a field name, got `{token}`")]
    ExpectedField { token: String },
    #[error("expected a list index, got `{token}`")]
    ExpectedIndex { token: String },
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("cannot descend into a {kind} value")]
    NotAContainer { kind: &'static str },
    #[error("`+` is only valid when writing")]
    AppendOnRead,
    #[error("cannot append: the list's item type is not known here")]
    UnknownItemType,
}

/// One parsed path token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    Field(String),
    Index(i64),
    Append,
}

impl PathToken {
    fn describe(&self) -> String {
        match self {
            PathToken::Field(name) => name.clone(),
            PathToken::Index(i) => i.to_string(),
            PathToken::Append => "+".to_string(),
        }
    }
}

/// Split a dot-path into tokens. Tokens that parse as integers become
/// indices; `+` becomes the append marker; everything else is a field name.
pub fn parse_path(path: &str) -> Result<Vec<PathToken>, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    path.split('.')
        .map(|token| {
            if token.is_empty() {
                Err(PathError::EmptyToken(path.to_string()))
            } else if token == "+" {
                Ok(PathToken::Append)
            } else if let Ok(index) = token.parse::<i64>() {
                Ok(PathToken::Index(index))
            } else {
                Ok(PathToken::Field(token.to_string()))
            }
        })
        .collect()
}

/// Read the value at `path`.
pub fn get<'a>(root: &'a RecordNode, path: &str) -> Result<&'a RecordValue, PathError> {
    let tokens = parse_path(path)?;
    let mut current: Option<&RecordValue> = None;
    for token in &tokens {
        current = Some(match current {
            None => field_of(root, token)?,
            Some(value) => step(value, token)?,
        });
    }
    // tokens is non-empty, so current is set
    current.ok_or(PathError::Empty)
}

/// Write `value` at `path`, creating a fresh list slot when the final token
/// is `+`. Intermediate `+` tokens append a default-constructed item and
/// descend into it.
pub fn set(
    root: &mut RecordNode,
    path: &str,
    value: impl Into<RecordValue>,
) -> Result<(), PathError> {
    let tokens = parse_path(path)?;
    let value = value.into();
    let (last, init) = tokens.split_last().ok_or(PathError::Empty)?;

    let mut cursor = Cursor::Node(root);
    for token in init {
        cursor = cursor.step(token)?;
    }
    cursor.assign(last, value)
}

fn field_of<'a>(node: &'a RecordNode, token: &PathToken) -> Result<&'a RecordValue, PathError> {
    match token {
        PathToken::Field(name) => node.get(name).ok_or_else(|| PathError::UnknownField {
            type_name: node.type_name().to_string(),
            field: name.clone(),
        }),
        PathToken::Append => Err(PathError::AppendOnRead),
        PathToken::Index(_) => Err(PathError::ExpectedField {
            token: token.describe(),
        }),
    }
}

fn step<'a>(value: &'a RecordValue, token: &PathToken) -> Result<&'a RecordValue, PathError> {
    match value {
        RecordValue::Record(node) => field_of(node, token),
        RecordValue::List(items) => match token {
            PathToken::Index(index) => {
                let idx = resolve_index(*index, items.len())?;
                Ok(&items[idx])
            }
            PathToken::Append => Err(PathError::AppendOnRead),
            PathToken::Field(_) => Err(PathError::ExpectedIndex {
                token: token.describe(),
            }),
        },
        other => Err(PathError::NotAContainer {
            kind: other.kind_name(),
        }),
    }
}

fn resolve_index(index: i64, len: usize) -> Result<usize, PathError> {
    let resolved = if index < 0 {
        index + len as i64
    } else {
        index
    };
    if resolved < 0 || resolved as usize >= len {
        Err(PathError::IndexOutOfRange { index, len })
    } else {
        Ok(resolved as usize)
    }
}

/// A mutable position during traversal. List positions remember the
/// declared item kind of the path that led here, so `+` can construct a
/// default element.
enum Cursor<'a> {
    Node(&'a mut RecordNode),
    Value {
        value: &'a mut RecordValue,
        kind: Option<&'static FieldKind>,
    },
}

impl<'a> Cursor<'a> {
    fn step(self, token: &PathToken) -> Result<Cursor<'a>, PathError> {
        match self {
            Cursor::Node(node) => Self::step_node(node, token),
            Cursor::Value { value, kind } => match value {
                RecordValue::Record(node) => Self::step_node(node, token),
                RecordValue::List(items) => Self::step_list(items, kind, token),
                other => Err(PathError::NotAContainer {
                    kind: other.kind_name(),
                }),
            },
        }
    }

    fn step_node(node: &'a mut RecordNode, token: &PathToken) -> Result<Cursor<'a>, PathError> {
        match token {
            PathToken::Field(name) => {
                let type_name = node.type_name();
                let (def, value) = node.entry_mut(name).ok_or_else(|| PathError::UnknownField {
                    type_name: type_name.to_string(),
                    field: name.clone(),
                })?;
                Ok(Cursor::Value {
                    value,
                    kind: Some(&def.kind),
                })
            }
            PathToken::Append | PathToken::Index(_) => Err(PathError::ExpectedField {
                token: token.describe(),
            }),
        }
    }

    fn step_list(
        items: &'a mut Vec<RecordValue>,
        kind: Option<&'static FieldKind>,
        token: &PathToken,
    ) -> Result<Cursor<'a>, PathError> {
        let item_kind = match kind {
            Some(FieldKind::List(item)) => Some(*item),
            _ => None,
        };
        match token {
            PathToken::Index(index) => {
                let idx = resolve_index(*index, items.len())?;
                Ok(Cursor::Value {
                    value: &mut items[idx],
                    kind: item_kind,
                })
            }
            PathToken::Append => {
                let item_kind = item_kind.ok_or(PathError::UnknownItemType)?;
                items.push(item_kind.default_value());
                let idx = items.len() - 1;
                Ok(Cursor::Value {
                    value: &mut items[idx],
                    kind: Some(item_kind),
                })
            }
            PathToken::Field(_) => Err(PathError::ExpectedIndex {
                token: token.describe(),
            }),
        }
    }

    fn assign(self, token: &PathToken, new_value: RecordValue) -> Result<(), PathError> {
        match self {
            Cursor::Node(node) => Self::assign_node(node, token, new_value),
            Cursor::Value { value, .. } => match value {
                RecordValue::Record(node) => Self::assign_node(node, token, new_value),
                RecordValue::List(items) => match token {
                    PathToken::Index(index) => {
                        let idx = resolve_index(*index, items.len())?;
                        items[idx] = new_value;
                        Ok(())
                    }
                    PathToken::Append => {
                        // `+` as the final token creates and fills the slot
                        // in one step
                        items.push(new_value);
                        Ok(())
                    }
                    PathToken::Field(_) => Err(PathError::ExpectedIndex {
                        token: token.describe(),
                    }),
                },
                other => Err(PathError::NotAContainer {
                    kind: other.kind_name(),
                }),
            },
        }
    }

    fn assign_node(
        node: &mut RecordNode,
        token: &PathToken,
        new_value: RecordValue,
    ) -> Result<(), PathError> {
        match token {
            PathToken::Field(name) => {
                let type_name = node.type_name();
                let (_, slot) = node.entry_mut(name).ok_or_else(|| PathError::UnknownField {
                    type_name: type_name.to_string(),
                    field: name.clone(),
                })?;
                *slot = new_value;
                Ok(())
            }
            PathToken::Append | PathToken::Index(_) => Err(PathError::ExpectedField {
                token: token.describe(),
            }),
        }
    }
}
