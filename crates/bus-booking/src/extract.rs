//! Typed extraction of records from backend payloads.

use json_ref_graph::{RecordSchema, ResolveIssue, ResolveOptions, Resolver};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::BookingError;
use crate::model::{Amenity, Booking, Bus, User};
use crate::schema;

/// Typed records plus the issues met while resolving them.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<T> {
    pub items: Vec<T>,
    pub issues: Vec<ResolveIssue>,
}

#[derive(Debug, Clone, Default)]
pub struct Extractor {
    resolver: Resolver,
}

impl Extractor {
    pub fn new(options: ResolveOptions) -> Result<Self, BookingError> {
        Ok(Self {
            resolver: Resolver::new(options)?,
        })
    }

    pub fn bookings(&self, root: &Value) -> Result<Extracted<Booking>, BookingError> {
        self.extract(root, &schema::booking())
    }

    pub fn buses(&self, root: &Value) -> Result<Extracted<Bus>, BookingError> {
        self.extract(root, &schema::bus())
    }

    pub fn users(&self, root: &Value) -> Result<Extracted<User>, BookingError> {
        self.extract(root, &schema::user())
    }

    pub fn amenities(&self, root: &Value) -> Result<Extracted<Amenity>, BookingError> {
        self.extract(root, &schema::amenity())
    }

    fn extract<T: DeserializeOwned>(
        &self,
        root: &Value,
        schema: &RecordSchema,
    ) -> Result<Extracted<T>, BookingError> {
        schema.validate()?;
        let resolution = self.resolver.resolve(root, schema);
        if !resolution.is_clean() {
            tracing::debug!(
                kind = schema.name(),
                issues = resolution.issues.len(),
                "payload resolved with issues"
            );
        }
        let items = resolution
            .records
            .iter()
            .map(|record| {
                record.to_typed().map_err(|source| BookingError::Record {
                    kind: record.kind().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<T>, _>>()?;
        Ok(Extracted {
            items,
            issues: resolution.issues,
        })
    }
}

pub fn extract_bookings(root: &Value) -> Result<Vec<Booking>, BookingError> {
    Ok(Extractor::default().bookings(root)?.items)
}

pub fn extract_buses(root: &Value) -> Result<Vec<Bus>, BookingError> {
    Ok(Extractor::default().buses(root)?.items)
}

pub fn extract_users(root: &Value) -> Result<Vec<User>, BookingError> {
    Ok(Extractor::default().users(root)?.items)
}

pub fn extract_amenities(root: &Value) -> Result<Vec<Amenity>, BookingError> {
    Ok(Extractor::default().amenities(root)?.items)
}

pub fn parse_bookings(text: &str) -> Result<Vec<Booking>, BookingError> {
    extract_bookings(&serde_json::from_str(text)?)
}

pub fn parse_buses(text: &str) -> Result<Vec<Bus>, BookingError> {
    extract_buses(&serde_json::from_str(text)?)
}

pub fn parse_users(text: &str) -> Result<Vec<User>, BookingError> {
    extract_users(&serde_json::from_str(text)?)
}

pub fn parse_amenities(text: &str) -> Result<Vec<Amenity>, BookingError> {
    extract_amenities(&serde_json::from_str(text)?)
}
