//! Pre-execution cost estimation via dry runs.

use crate::client::QueryClient;
use crate::error::{ClimateQueryError, Result};
use crate::query::QueryRequest;

/// Base-2 scaling for display: 1 GiB = 1024^3 bytes.
pub const BYTES_PER_GIB: f64 = (1u64 << 30) as f64;

/// Dry-run every request and return the summed scan volume in gigabytes.
///
/// Runs sequentially; the calls are independent and purely summed, so
/// concurrency would only be an optimization. Fails as a whole with
/// [`ClimateQueryError::EstimationFailed`] on the first dry run that errors;
/// no partial sum is reported.
pub async fn estimate_gigabytes<C>(client: &C, requests: &[QueryRequest]) -> Result<f64>
where
    C: QueryClient + ?Sized,
{
    let mut total_bytes: u64 = 0;
    for request in requests {
        let bytes = client
            .dry_run_bytes(&request.resolved_query)
            .await
            .map_err(|source| ClimateQueryError::EstimationFailed {
                name: request.name.clone(),
                source,
            })?;
        tracing::debug!(name = %request.name, bytes, "dry run estimate");
        total_bytes += bytes;
    }
    Ok(total_bytes as f64 / BYTES_PER_GIB)
}
