//! US climate statistics over BigQuery public datasets.
//!
//! For a user-selected state and year this crate builds one parametrized
//! standard-SQL query per topic (temperature, pollution, precipitation),
//! estimates their combined scan cost via dry runs, and on explicit request
//! executes them concurrently, returning typed tabular results keyed by
//! topic name. Chart rendering is a downstream consumer and not part of
//! this crate.

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod estimate;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod query;

pub use catalog::{RegionParam, Topic, YEARS};
pub use client::{BigQueryClient, BigQueryConfig, QueryClient};
pub use config::{AppConfig, CliArgs};
pub use error::{ClimateQueryError, RemoteQueryError};
pub use estimate::{BYTES_PER_GIB, estimate_gigabytes};
pub use fetch::fetch_all;
pub use logging::{LoggingConfig, init_logging};
pub use model::{Column, FieldType, ResultBundle, TabularResult, Value};
pub use query::{QueryRequest, build_batch, build_request};

use anyhow::Result;
use std::sync::Arc;

/// CLI flow: print the dry-run cost estimate for the selected state/year,
/// and with `--run` execute the batch and print the results.
pub async fn run(config: AppConfig) -> Result<()> {
    let client = Arc::new(BigQueryClient::new(config.bigquery.clone()));

    let requests = config
        .topics
        .iter()
        .map(|topic| query::build_request(*topic, &config.state, config.year))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(
        state = %config.state,
        year = config.year,
        queries = requests.len(),
        "estimating scan cost"
    );
    let gigabytes = estimate_gigabytes(client.as_ref(), &requests).await?;
    println!(
        "The queries for {} in {} will process {:6.2} GB of data on BigQuery.",
        config.state, config.year, gigabytes
    );

    if !config.run {
        println!("Pass --run to execute them.");
        return Ok(());
    }

    tracing::info!("executing query batch");
    let location = config.bigquery.location.clone();
    let bundle = fetch_all(client, requests, &location).await?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        for (name, table) in bundle.iter() {
            println!(
                "{name}: {} rows x {} columns",
                table.num_rows(),
                table.num_columns()
            );
        }
    }

    Ok(())
}
