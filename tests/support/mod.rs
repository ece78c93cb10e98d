#![allow(dead_code)]

use async_trait::async_trait;
use climate_query::{Column, FieldType, QueryClient, RemoteQueryError, TabularResult, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

enum Outcome {
    Table(TabularResult),
    NetworkError(String),
}

struct Plan {
    /// Substring that identifies the query, e.g. a dataset name.
    needle: String,
    bytes: u64,
    outcome: Outcome,
}

/// Scripted [`QueryClient`]: responses are matched by a substring of the
/// incoming query text, so tests can key plans off dataset names.
pub struct MockQueryClient {
    plans: Vec<Plan>,
    executed: AtomicUsize,
    dry_runs: AtomicUsize,
}

impl MockQueryClient {
    pub fn new() -> Self {
        Self {
            plans: Vec::new(),
            executed: AtomicUsize::new(0),
            dry_runs: AtomicUsize::new(0),
        }
    }

    pub fn respond(mut self, needle: &str, bytes: u64, table: TabularResult) -> Self {
        self.plans.push(Plan {
            needle: needle.to_string(),
            bytes,
            outcome: Outcome::Table(table),
        });
        self
    }

    pub fn fail(mut self, needle: &str, message: &str) -> Self {
        self.plans.push(Plan {
            needle: needle.to_string(),
            bytes: 0,
            outcome: Outcome::NetworkError(message.to_string()),
        });
        self
    }

    pub fn executed_count(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }

    pub fn dry_run_count(&self) -> usize {
        self.dry_runs.load(Ordering::SeqCst)
    }

    fn plan_for(&self, query: &str) -> Result<&Plan, RemoteQueryError> {
        self.plans
            .iter()
            .find(|plan| query.contains(&plan.needle))
            .ok_or_else(|| RemoteQueryError::Failed {
                message: "no scripted response matches the query".to_string(),
            })
    }
}

#[async_trait]
impl QueryClient for MockQueryClient {
    async fn execute(
        &self,
        query: &str,
        _location: &str,
    ) -> Result<TabularResult, RemoteQueryError> {
        self.executed.fetch_add(1, Ordering::SeqCst);
        match &self.plan_for(query)?.outcome {
            Outcome::Table(table) => Ok(table.clone()),
            Outcome::NetworkError(message) => Err(RemoteQueryError::Rejected {
                status: 503,
                message: message.clone(),
            }),
        }
    }

    async fn dry_run_bytes(&self, query: &str) -> Result<u64, RemoteQueryError> {
        self.dry_runs.fetch_add(1, Ordering::SeqCst);
        let plan = self.plan_for(query)?;
        match &plan.outcome {
            Outcome::Table(_) => Ok(plan.bytes),
            Outcome::NetworkError(message) => Err(RemoteQueryError::Rejected {
                status: 503,
                message: message.clone(),
            }),
        }
    }
}

/// A small single-column table with `rows` integer rows.
pub fn table_with_rows(rows: usize) -> TabularResult {
    TabularResult {
        columns: vec![Column {
            name: "month".to_string(),
            field_type: FieldType::Integer,
        }],
        rows: (0..rows).map(|i| vec![Value::Integer(i as i64)]).collect(),
    }
}

/// Dataset-name needles for the three topics, matching the catalog
/// templates.
pub const TEMPERATURE_NEEDLE: &str = "noaa_gsod";
pub const POLLUTION_NEEDLE: &str = "epa_historical_air_quality";
pub const PRECIPITATION_NEEDLE: &str = "ghcn_d";
