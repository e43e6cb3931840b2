use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::markers::Markers;

/// Resolver configuration.
///
/// Deserializes with every field optional, so a host application can embed
/// it in its own config file:
///
/// ```toml
/// [markers]
/// id = "$id"
/// ref = "$ref"
/// values = "$values"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    pub markers: Markers,
    /// Timestamp substituted for missing dates. When unset the system clock
    /// is read once per resolve call.
    pub now: Option<DateTime<Utc>>,
}

impl ResolveOptions {
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    /// Pins the default timestamp, making output reproducible across calls.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn validate(&self) -> Result<(), ResolveError> {
        self.markers.validate()
    }

    /// Default timestamp in the form the backend writes dates.
    pub(crate) fn timestamp(&self) -> String {
        self.now
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
