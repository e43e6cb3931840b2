//! Marker keys of the reference-preserving serialization convention.
//!
//! A serializer that preserves object identity tags every shared object with
//! an identity field (`"$id": "3"`), replaces later occurrences with a pointer
//! object (`{"$ref": "3"}`) and wraps arrays as `{"$values": [...]}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ResolveError;

pub const ID_MARKER: &str = "$id";
pub const REF_MARKER: &str = "$ref";
pub const VALUES_MARKER: &str = "$values";

/// The three marker keys a document uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub values: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            id: ID_MARKER.to_string(),
            reference: REF_MARKER.to_string(),
            values: VALUES_MARKER.to_string(),
        }
    }
}

impl Markers {
    /// Rejects empty or colliding marker keys.
    pub fn validate(&self) -> Result<(), ResolveError> {
        for (name, key) in [
            ("id", &self.id),
            ("ref", &self.reference),
            ("values", &self.values),
        ] {
            if key.is_empty() {
                return Err(ResolveError::InvalidMarkers(format!(
                    "{name} marker must not be empty"
                )));
            }
        }
        if self.id == self.reference || self.id == self.values || self.reference == self.values {
            return Err(ResolveError::InvalidMarkers(
                "marker keys must be distinct".to_string(),
            ));
        }
        Ok(())
    }

    /// Identity token carried by `node`, if it is an identified object.
    pub fn identity_of(&self, node: &Value) -> Option<String> {
        node.as_object()?.get(&self.id).and_then(token)
    }

    /// Whether `node` is a reference marker object.
    ///
    /// An object carrying the reference key is a pointer regardless of what
    /// else it holds, even when the token itself is malformed.
    pub fn is_reference(&self, node: &Value) -> bool {
        node.as_object()
            .is_some_and(|obj| obj.contains_key(&self.reference))
    }

    /// Token named by a reference marker object.
    pub fn reference_of(&self, node: &Value) -> Option<String> {
        node.as_object()?.get(&self.reference).and_then(token)
    }

    /// Elements of a collection: a bare array or an object wrapping one under
    /// the values key.
    pub fn collection_items<'a>(&self, node: &'a Value) -> Option<&'a [Value]> {
        match node {
            Value::Array(items) => Some(items),
            Value::Object(obj) => match obj.get(&self.values) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Normalizes an identity or reference value to a table key.
///
/// Strings and numbers are both accepted, so `"7"` and `7` name the same
/// node. Empty strings and every other shape carry no token.
pub fn token(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
