use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// One flattened, reference-free record.
///
/// Fields appear in schema order. Nested records are fully projected
/// objects; no identity, reference or collection markers remain.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainRecord {
    kind: String,
    fields: Map<String, Value>,
}

impl DomainRecord {
    pub fn new(kind: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            kind: kind.into(),
            fields,
        }
    }

    /// Name of the schema that produced this record.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Deserializes the record into a typed struct.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.fields.clone()))
    }
}
