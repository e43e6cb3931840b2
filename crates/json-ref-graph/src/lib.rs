//! json-ref-graph: flatten reference-preserving JSON into plain records.
//!
//! Serializers that preserve object identity emit documents where shared
//! objects appear once with an identity field (`$id`) and everywhere else as
//! pointers (`{"$ref": "..."}`), and where arrays are wrapped as
//! `{"$values": [...]}`. This crate turns such a document into an ordered,
//! de-duplicated list of [`DomainRecord`]s described by a [`RecordSchema`].
//!
//! ```
//! use json_ref_graph::{resolve, RecordSchema, ValueKind};
//! use serde_json::json;
//!
//! let booking = RecordSchema::new("Booking")
//!     .require("id", ValueKind::Number)
//!     .integer("id")
//!     .text("status", "Unknown")
//!     .record("user", RecordSchema::new("User").text("fullName", "Unknown User"));
//!
//! let doc = json!({"$id": "1", "$values": [
//!     {"$id": "2", "id": 1, "status": "Booked", "user": {"$id": "3", "fullName": "Asha"}},
//!     {"$id": "4", "id": 2, "user": {"$ref": "3"}}
//! ]});
//!
//! let records = resolve(&doc, &booking);
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].get("status"), Some(&json!("Unknown")));
//! assert_eq!(records[1].get("user"), Some(&json!({"fullName": "Asha"})));
//! ```

mod error;
mod markers;
mod options;
mod record;
mod resolver;
mod schema;
mod table;
mod walk;

pub use error::{ResolveError, ResolveIssue};
pub use markers::{token, Markers, ID_MARKER, REF_MARKER, VALUES_MARKER};
pub use options::ResolveOptions;
pub use record::DomainRecord;
pub use resolver::{resolve, Resolution, Resolver};
pub use schema::{FieldKind, FieldSpec, RecordSchema, ValueKind};
pub use table::{Deref, ReferenceTable};
pub use walk::{walk, Walk};
