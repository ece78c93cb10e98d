//! Concurrent fetch orchestrator: fan out one task per request, join them
//! all, return everything or nothing.

use crate::client::QueryClient;
use crate::error::{ClimateQueryError, Result};
use crate::model::ResultBundle;
use crate::query::QueryRequest;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Execute every request concurrently against the shared client and collect
/// the results keyed by logical name.
///
/// All-or-nothing: if any request fails, the whole batch fails with
/// [`ClimateQueryError::QueryExecutionFailed`] naming that request, and no
/// bundle is returned. Siblings of a failed request are left to run to
/// completion; their results are discarded. No retry, no orchestrator-side
/// timeout — the client's own timeout behavior bounds each branch.
pub async fn fetch_all<C>(
    client: Arc<C>,
    requests: Vec<QueryRequest>,
    location: &str,
) -> Result<ResultBundle>
where
    C: QueryClient + ?Sized + 'static,
{
    let mut seen = HashSet::new();
    for request in &requests {
        if !seen.insert(request.name.clone()) {
            return Err(ClimateQueryError::DuplicateRequestName(request.name.clone()));
        }
    }

    let mut tasks = JoinSet::new();
    for request in requests {
        let client = Arc::clone(&client);
        let location = location.to_string();
        tasks.spawn(async move {
            tracing::debug!(name = %request.name, region = %request.region_code, year = request.year, "executing query");
            let result = client.execute(&request.resolved_query, &location).await;
            (request, result)
        });
    }

    let mut bundle = ResultBundle::new();
    let mut first_failure: Option<ClimateQueryError> = None;
    while let Some(joined) = tasks.join_next().await {
        let (request, result) = joined?;
        match result {
            Ok(table) => {
                tracing::debug!(name = %request.name, rows = table.num_rows(), "query finished");
                bundle.insert(request.name, table);
            }
            Err(source) => {
                tracing::warn!(name = %request.name, error = %source, "query failed");
                if first_failure.is_none() {
                    first_failure = Some(ClimateQueryError::QueryExecutionFailed {
                        name: request.name,
                        source,
                    });
                }
            }
        }
    }

    match first_failure {
        Some(err) => Err(err),
        None => Ok(bundle),
    }
}
