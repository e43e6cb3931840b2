//! Declarative record schemas.
//!
//! A [`RecordSchema`] says how to recognize one kind of record in a document
//! (its predicate) and how to project a matching object into a flat record
//! (its fields). The resolver is generic over schemas, so adding a record
//! kind never touches traversal code.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::ResolveError;
use crate::markers::{token, Markers};

/// Shape a predicate field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    /// Any JSON number.
    Number,
    /// A JSON number with no fractional part.
    Integer,
    String,
    Array,
    Object,
    /// Present and not `null`, `false`, `0` or `""`.
    Truthy,
}

impl ValueKind {
    pub fn matches(self, value: Option<&Value>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self {
            ValueKind::Null => value.is_null(),
            ValueKind::Bool => value.is_boolean(),
            ValueKind::Number => value.is_number(),
            ValueKind::Integer => as_integer(value).is_some(),
            ValueKind::String => value.is_string(),
            ValueKind::Array => value.is_array(),
            ValueKind::Object => value.is_object(),
            ValueKind::Truthy => is_truthy(value),
        }
    }
}

/// How a projected field is read and what it falls back to.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Integer, defaults to `0`.
    Integer,
    /// Any number, kept as written. Defaults to `0`.
    Number,
    /// Non-empty string, otherwise the given literal.
    Text(String),
    /// Non-empty string, or an array (or collection wrapper) of scalars joined
    /// with `,`. Otherwise the given literal.
    List(String),
    /// Boolean, defaults to `false`.
    Flag,
    /// Non-empty date string, otherwise the resolution timestamp.
    Timestamp,
    /// Nested record, inline or referenced. Omitted when absent or unresolved.
    Record(Box<RecordSchema>),
    /// Collection of nested records. Defaults to an empty array; unresolved
    /// entries are dropped.
    Collection(Box<RecordSchema>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

/// Predicate and projection for one record kind.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    name: String,
    key: String,
    predicate: Vec<(String, ValueKind)>,
    fields: Vec<FieldSpec>,
}

impl RecordSchema {
    /// Empty schema keyed by `id`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: "id".to_string(),
            predicate: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Field whose value identifies a record for de-duplication.
    pub fn keyed_by(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Adds a predicate clause. A schema without clauses is projection-only
    /// and never matches during discovery.
    pub fn require(mut self, field: impl Into<String>, kind: ValueKind) -> Self {
        self.predicate.push((field.into(), kind));
        self
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn integer(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Integer)
    }

    pub fn number(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Number)
    }

    pub fn text(self, name: impl Into<String>, fallback: impl Into<String>) -> Self {
        self.field(name, FieldKind::Text(fallback.into()))
    }

    pub fn list(self, name: impl Into<String>, fallback: impl Into<String>) -> Self {
        self.field(name, FieldKind::List(fallback.into()))
    }

    pub fn flag(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Flag)
    }

    pub fn timestamp(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Timestamp)
    }

    pub fn record(self, name: impl Into<String>, schema: RecordSchema) -> Self {
        self.field(name, FieldKind::Record(Box::new(schema)))
    }

    pub fn collection(self, name: impl Into<String>, schema: RecordSchema) -> Self {
        self.field(name, FieldKind::Collection(Box::new(schema)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn predicate(&self) -> &[(String, ValueKind)] {
        &self.predicate
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Whether `node` is a candidate record of this kind.
    pub fn matches(&self, node: &Value, markers: &Markers) -> bool {
        let Some(obj) = node.as_object() else {
            return false;
        };
        !self.predicate.is_empty()
            && !markers.is_reference(node)
            && self
                .predicate
                .iter()
                .all(|(field, kind)| kind.matches(obj.get(field)))
    }

    /// Domain identity of `node`, read from the key field.
    ///
    /// The key agrees with what the key field projects to: an `Integer` key
    /// field yields its projected integer (so `42`, `42.0` and an
    /// unreadable id collapse the way their output does). Otherwise numbers
    /// are read as integers when whole and strings are taken as written.
    pub fn record_key(&self, node: &Value) -> Option<String> {
        let raw = node.get(&self.key);
        let projected = self
            .fields
            .iter()
            .find(|spec| spec.name == self.key)
            .map(|spec| &spec.kind);
        if let Some(FieldKind::Integer) = projected {
            return Some(raw.and_then(as_integer).unwrap_or(0).to_string());
        }
        let raw = raw?;
        match as_integer(raw) {
            Some(i) => Some(i.to_string()),
            None => token(raw),
        }
    }

    /// Rejects duplicate field names, here and in nested schemas.
    pub fn validate(&self) -> Result<(), ResolveError> {
        let mut seen = HashSet::new();
        for spec in &self.fields {
            if !seen.insert(spec.name.as_str()) {
                return Err(ResolveError::InvalidSchema {
                    schema: self.name.clone(),
                    reason: format!("field `{}` declared twice", spec.name),
                });
            }
            match &spec.kind {
                FieldKind::Record(nested) | FieldKind::Collection(nested) => nested.validate()?,
                _ => {}
            }
        }
        Ok(())
    }
}

/// Integer view of a JSON number, accepting floats with no fractional part.
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
