use json_ref_graph::ResolveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{kind} record does not fit its typed shape: {source}")]
    Record {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}
