//! Error taxonomy for the climate query pipeline.
//!
//! Two layers:
//! - [`RemoteQueryError`] wraps anything that goes wrong talking to the
//!   remote query service (transport, rejection, undecodable response).
//! - [`ClimateQueryError`] is the library-level taxonomy: local validation
//!   failures plus aggregate failures raised by the orchestrator and the
//!   cost estimator, each naming the request that failed.

use thiserror::Error;

/// Failure reported by the remote query service or the transport under it.
#[derive(Debug, Error)]
pub enum RemoteQueryError {
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service accepted the connection but rejected the request
    /// (malformed SQL, permission failure, quota, ...).
    #[error("remote query service rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The service answered 200 but reported query-level errors in-band.
    #[error("remote query service reported an error: {message}")]
    Failed { message: String },

    /// The service-side wait expired before the job finished.
    #[error("query did not complete within the service-side timeout")]
    Incomplete,

    #[error("malformed response from remote query service: {0}")]
    Decode(String),
}

/// Library-level error taxonomy.
///
/// None of these are retried internally. Retry policy, if any, belongs to
/// the caller.
#[derive(Debug, Error)]
pub enum ClimateQueryError {
    #[error("unknown region: {0:?}")]
    UnknownRegion(String),

    #[error("unknown topic: {0:?} (expected temperature, pollution or precipitation)")]
    UnknownTopic(String),

    #[error("no value supplied for placeholder {{{placeholder}}}")]
    MissingPlaceholder { placeholder: String },

    #[error("rendered query still contains unresolved placeholders: {placeholders:?}")]
    UnresolvedPlaceholders { placeholders: Vec<String> },

    #[error("duplicate query name in batch: {0:?}")]
    DuplicateRequestName(String),

    /// A named request in a fetch batch failed. The batch fails as a whole;
    /// results from sibling requests are discarded.
    #[error("query {name:?} failed")]
    QueryExecutionFailed {
        name: String,
        #[source]
        source: RemoteQueryError,
    },

    /// A dry-run estimate for a named request failed. No partial sum is
    /// reported.
    #[error("cost estimation for query {name:?} failed")]
    EstimationFailed {
        name: String,
        #[source]
        source: RemoteQueryError,
    },

    #[error("background query task failed")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T, E = ClimateQueryError> = std::result::Result<T, E>;

impl ClimateQueryError {
    /// Name of the request an aggregate failure points at, if any.
    pub fn request_name(&self) -> Option<&str> {
        match self {
            ClimateQueryError::QueryExecutionFailed { name, .. }
            | ClimateQueryError::EstimationFailed { name, .. } => Some(name),
            _ => None,
        }
    }
}
