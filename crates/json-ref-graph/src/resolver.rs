//! Schema-driven flattening of reference-preserving JSON.
//!
//! Resolution runs in three steps over one document:
//!
//! 1. index every identified object ([`ReferenceTable::build`]);
//! 2. walk the document depth-first and collect each object matching the
//!    schema predicate, once per domain key;
//! 3. project each candidate into a [`DomainRecord`], following at most one
//!    reference per nested field.
//!
//! Step 3 recurses along the schema, never along the document graph, so
//! cyclic documents terminate.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::{ResolveError, ResolveIssue};
use crate::options::ResolveOptions;
use crate::record::DomainRecord;
use crate::schema::{as_integer, is_truthy, FieldKind, RecordSchema};
use crate::table::{Deref, ReferenceTable};
use crate::walk::{walk, Walk};

/// Records found in a document, with the problems met on the way.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolution {
    pub records: Vec<DomainRecord>,
    pub issues: Vec<ResolveIssue>,
}

impl Resolution {
    /// No unresolved references or duplicate identities were seen.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Resolver {
    options: ResolveOptions,
}

impl Resolver {
    pub fn new(options: ResolveOptions) -> Result<Self, ResolveError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Flattens every record of `schema` kind found in `root`.
    ///
    /// Never fails: missing or malformed fields take their defaults and
    /// dangling references become absent fields plus an issue.
    pub fn resolve(&self, root: &Value, schema: &RecordSchema) -> Resolution {
        let table = ReferenceTable::build(root, &self.options.markers);
        let mut pass = Pass::new(&table, self.options.timestamp());
        for token in table.duplicates() {
            pass.issues.push(ResolveIssue::DuplicateIdentity {
                token: token.clone(),
            });
        }

        let mut seen_keys: HashSet<String> = HashSet::new();
        let mut seen_identities: HashSet<&str> = HashSet::new();
        let mut records = Vec::new();
        walk(root, &mut |node| {
            let (candidate, next) = match table.deref(node) {
                Deref::Inline(node) => (node, Walk::Continue),
                // A pointer is an encounter of its target; the target's own
                // children are walked where it is defined.
                Deref::Resolved(target) => (target, Walk::Skip),
                Deref::Unresolved(token) => {
                    tracing::trace!(%token, "dangling reference skipped during discovery");
                    return Walk::Skip;
                }
            };
            if !schema.matches(candidate, table.markers()) {
                return next;
            }
            let fresh = match schema.record_key(candidate) {
                Some(key) => seen_keys.insert(key),
                // Without a key, a record is new unless its registered
                // identity was already met. Unregistered objects are only
                // reachable inline, so the walk meets each of them once.
                None => match table.identity(candidate) {
                    Some(identity) => seen_identities.insert(identity),
                    None => true,
                },
            };
            if fresh {
                let record = pass.project(candidate, schema, schema.name());
                tracing::trace!(
                    kind = schema.name(),
                    key = ?schema.record_key(candidate),
                    "record emitted"
                );
                records.push(record);
            }
            next
        });

        Resolution {
            records,
            issues: pass.issues,
        }
    }

    /// Checks `schema`, then decodes `text` and resolves it.
    pub fn resolve_str(&self, text: &str, schema: &RecordSchema) -> Result<Resolution, ResolveError> {
        schema.validate()?;
        let root: Value = serde_json::from_str(text)?;
        Ok(self.resolve(&root, schema))
    }
}

/// Flattens `root` with default options, discarding issues.
pub fn resolve(root: &Value, schema: &RecordSchema) -> Vec<DomainRecord> {
    Resolver::default().resolve(root, schema).records
}

/// State of one resolve call.
struct Pass<'t, 'a> {
    table: &'t ReferenceTable<'a>,
    now: String,
    issues: Vec<ResolveIssue>,
}

impl<'t, 'a> Pass<'t, 'a> {
    fn new(table: &'t ReferenceTable<'a>, now: String) -> Self {
        Self {
            table,
            now,
            issues: Vec::new(),
        }
    }

    fn project(&mut self, node: &'a Value, schema: &RecordSchema, path: &str) -> DomainRecord {
        let obj = node.as_object();
        let mut fields = Map::new();
        for spec in schema.fields() {
            let raw = obj.and_then(|o| o.get(&spec.name));
            let value = match &spec.kind {
                FieldKind::Integer => Value::from(raw.and_then(as_integer).unwrap_or(0)),
                FieldKind::Number => match raw {
                    Some(Value::Number(n)) => Value::Number(n.clone()),
                    _ => Value::from(0),
                },
                FieldKind::Text(fallback) => Value::String(
                    non_empty_str(raw).unwrap_or(fallback.as_str()).to_string(),
                ),
                FieldKind::List(fallback) => Value::String(
                    self.list(raw).unwrap_or_else(|| fallback.clone()),
                ),
                FieldKind::Flag => Value::Bool(raw.and_then(Value::as_bool).unwrap_or(false)),
                FieldKind::Timestamp => Value::String(
                    non_empty_str(raw).unwrap_or(self.now.as_str()).to_string(),
                ),
                FieldKind::Record(nested) => {
                    let location = format!("{path}.{}", spec.name);
                    match self.follow(raw, &location) {
                        Some(target) if target.is_object() => {
                            self.project(target, nested, &location).into_value()
                        }
                        _ => continue,
                    }
                }
                FieldKind::Collection(nested) => {
                    let location = format!("{path}.{}", spec.name);
                    Value::Array(self.collection(raw, nested, &location))
                }
            };
            fields.insert(spec.name.clone(), value);
        }
        DomainRecord::new(schema.name(), fields)
    }

    /// Follows one reference level. `None` for absent, null and dangling.
    fn follow(&mut self, raw: Option<&'a Value>, location: &str) -> Option<&'a Value> {
        let node = raw.filter(|v| !v.is_null())?;
        match self.table.deref(node) {
            Deref::Inline(node) | Deref::Resolved(node) => Some(node),
            Deref::Unresolved(token) => {
                tracing::debug!(%token, location, "unresolved reference");
                self.issues.push(ResolveIssue::UnresolvedReference {
                    token,
                    location: location.to_string(),
                });
                None
            }
        }
    }

    fn collection(
        &mut self,
        raw: Option<&'a Value>,
        schema: &RecordSchema,
        location: &str,
    ) -> Vec<Value> {
        let Some(items) = self
            .follow(raw, location)
            .and_then(|node| self.table.markers().collection_items(node))
        else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let item_location = format!("{location}[{index}]");
            if let Some(target) = self.follow(Some(item), &item_location) {
                if target.is_object() {
                    out.push(self.project(target, schema, &item_location).into_value());
                }
            }
        }
        out
    }

    fn list(&self, raw: Option<&'a Value>) -> Option<String> {
        if let Some(s) = non_empty_str(raw) {
            return Some(s.to_string());
        }
        let items = self.table.markers().collection_items(raw?)?;
        let parts: Vec<String> = items
            .iter()
            .filter(|item| is_truthy(item))
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect();
        (!parts.is_empty()).then(|| parts.join(","))
    }
}

fn non_empty_str(raw: Option<&Value>) -> Option<&str> {
    raw.and_then(Value::as_str).filter(|s| !s.is_empty())
}
