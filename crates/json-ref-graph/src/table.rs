//! Identity table built in a single indexing pass.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_json::Value;

use crate::markers::Markers;
use crate::walk::{walk, Walk};

/// Outcome of following at most one reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Deref<'a> {
    /// The node was not a reference marker.
    Inline(&'a Value),
    /// The node was a reference marker and its target was found.
    Resolved(&'a Value),
    /// The node was a reference marker naming nothing in the table. Holds
    /// the token, or the raw marker value when it was malformed.
    Unresolved(String),
}

impl<'a> Deref<'a> {
    pub fn node(self) -> Option<&'a Value> {
        match self {
            Deref::Inline(node) | Deref::Resolved(node) => Some(node),
            Deref::Unresolved(_) => None,
        }
    }
}

/// Maps identity tokens to the first object seen carrying them.
#[derive(Debug, Clone)]
pub struct ReferenceTable<'a> {
    markers: Markers,
    entries: IndexMap<String, &'a Value>,
    duplicates: Vec<String>,
}

impl<'a> ReferenceTable<'a> {
    /// Registers every identified object reachable from `root`.
    ///
    /// Reference markers are never followed here, so cyclic documents are
    /// indexed in time linear to their size.
    pub fn build(root: &'a Value, markers: &Markers) -> Self {
        let mut entries: IndexMap<String, &'a Value> = IndexMap::new();
        let mut duplicates = Vec::new();
        walk(root, &mut |node| {
            if let Some(token) = markers.identity_of(node) {
                match entries.entry(token) {
                    Entry::Occupied(entry) => {
                        tracing::debug!(token = %entry.key(), "duplicate identity ignored");
                        duplicates.push(entry.key().clone());
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(node);
                    }
                }
            }
            Walk::Continue
        });
        Self {
            markers: markers.clone(),
            entries,
            duplicates,
        }
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn get(&self, token: &str) -> Option<&'a Value> {
        self.entries.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered tokens in first-registration order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Tokens seen again after their first registration.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Identity token under which `node` itself is registered.
    ///
    /// `None` for objects without an identity and for later duplicates of a
    /// token that an earlier object already claimed.
    pub fn identity(&self, node: &Value) -> Option<&str> {
        let token = self.markers.identity_of(node)?;
        let (token, registered) = self.entries.get_key_value(&token)?;
        std::ptr::eq(*registered, node).then_some(token.as_str())
    }

    /// Follows `node` one level if it is a reference marker.
    ///
    /// A target that is itself a reference marker counts as unresolved, so a
    /// caller never receives a pointer object in place of content.
    pub fn deref(&self, node: &'a Value) -> Deref<'a> {
        if !self.markers.is_reference(node) {
            return Deref::Inline(node);
        }
        let Some(token) = self.markers.reference_of(node) else {
            let raw = node.get(&self.markers.reference).map(Value::to_string);
            return Deref::Unresolved(raw.unwrap_or_default());
        };
        match self.get(&token) {
            Some(target) if !self.markers.is_reference(target) => Deref::Resolved(target),
            _ => Deref::Unresolved(token),
        }
    }
}
