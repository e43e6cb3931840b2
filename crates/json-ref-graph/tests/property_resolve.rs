//! Property checks over arbitrary marker-laden documents.

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use json_ref_graph::{RecordSchema, ResolveOptions, Resolver, ValueKind};
use proptest::prelude::*;
use serde_json::{Map, Value};

const KEYS: &[&str] = &["id", "userId", "busId", "$id", "$ref", "$values", "user", "bus", "status"];

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (0i64..6).prop_map(Value::from),
        prop::sample::select(vec![0.5, 2.0, 2.5, 4.0]).prop_map(Value::from),
        "[0-5]{0,1}".prop_map(Value::String),
    ]
}

fn document() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(5, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec((prop::sample::select(KEYS), inner), 0..6).prop_map(|entries| {
                let mut obj = Map::new();
                for (key, value) in entries {
                    obj.insert(key.to_string(), value);
                }
                Value::Object(obj)
            }),
        ]
    })
}

fn booking() -> RecordSchema {
    let user = RecordSchema::new("User").integer("id").text("status", "N/A");
    RecordSchema::new("Booking")
        .require("id", ValueKind::Number)
        .require("userId", ValueKind::Number)
        .integer("id")
        .list("status", "Unknown")
        .timestamp("bookingDate")
        .record("user", user.clone())
        .collection("bus", user)
}

/// Same shape, but the id is projected as written instead of as an integer.
fn ticket() -> RecordSchema {
    RecordSchema::new("Ticket")
        .require("id", ValueKind::Number)
        .require("userId", ValueKind::Number)
        .number("id")
        .list("status", "Unknown")
}

fn resolver() -> Resolver {
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    Resolver::new(ResolveOptions::default().with_now(now)).unwrap()
}

fn contains_marker(value: &Value) -> bool {
    match value {
        Value::Object(obj) => obj
            .iter()
            .any(|(k, v)| k.starts_with('$') || contains_marker(v)),
        Value::Array(arr) => arr.iter().any(contains_marker),
        _ => false,
    }
}

proptest! {
    #[test]
    fn resolve_is_idempotent(doc in document()) {
        let r = resolver();
        prop_assert_eq!(r.resolve(&doc, &booking()), r.resolve(&doc, &booking()));
    }

    #[test]
    fn records_are_unique_and_marker_free(doc in document()) {
        for schema in [booking(), ticket()] {
            let out = resolver().resolve(&doc, &schema);
            let mut keys = HashSet::new();
            for record in &out.records {
                let value = record.clone().into_value();
                prop_assert!(!contains_marker(&value));
                let id = record.get("id").cloned().unwrap_or(Value::Null);
                let key = id.as_f64().map_or_else(|| id.to_string(), |f| f.to_string());
                prop_assert!(keys.insert(key));
            }
        }
    }

    #[test]
    fn whole_float_ids_collapse(id in 0i64..6, user in 0i64..3) {
        let doc = serde_json::json!([
            {"id": id, "userId": 1, "status": "a"},
            {"id": id as f64, "userId": 1, "status": "b"},
            {"id": id as f64 + 0.5, "userId": user, "status": "c"}
        ]);
        let out = resolver().resolve(&doc, &booking());
        prop_assert_eq!(out.records.len(), if id == 0 { 1 } else { 2 });
        prop_assert_eq!(out.records[0].get("id"), Some(&Value::from(id)));
    }
}
