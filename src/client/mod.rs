//! The remote query service seam.
//!
//! The orchestrator and estimator only ever talk to [`QueryClient`]; the
//! concrete [`BigQueryClient`] implements it over the BigQuery REST API.
//! Tests substitute a scripted in-memory client.

mod bigquery;

pub use bigquery::{BigQueryClient, BigQueryConfig, DEFAULT_API_BASE, DEFAULT_LOCATION};

use crate::error::RemoteQueryError;
use crate::model::TabularResult;
use async_trait::async_trait;

/// Minimum capability surface the pipeline needs from a remote query
/// service. Each call is stateless request/response, so one client is safely
/// shared across concurrent callers.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Run a finalized query and return its tabular result. `location` is a
    /// processing-location hint for the service.
    async fn execute(&self, query: &str, location: &str)
    -> Result<TabularResult, RemoteQueryError>;

    /// Dry-run a finalized query, returning the number of bytes it would
    /// scan. No data moves and no query cost is incurred.
    async fn dry_run_bytes(&self, query: &str) -> Result<u64, RemoteQueryError>;
}
