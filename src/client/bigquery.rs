//! BigQuery REST implementation of [`QueryClient`] over `jobs.query`.
//!
//! Both execution and dry runs go through the same synchronous-query
//! endpoint; a dry run sets `dryRun: true` and reads `totalBytesProcessed`
//! from the response instead of rows. Credentials are an opaque bearer token
//! handed over in [`BigQueryConfig`]; how it was minted is not this crate's
//! concern.

use super::QueryClient;
use crate::error::RemoteQueryError;
use crate::model::{Column, FieldType, TabularResult, Value};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://bigquery.googleapis.com/bigquery/v2";
pub const DEFAULT_LOCATION: &str = "US";

/// How long the service may hold the request open waiting for the job.
const SERVICE_WAIT_MS: u64 = 120_000;

/// Explicit configuration for the BigQuery client. Process-wide, read-only
/// once constructed.
#[derive(Debug, Clone)]
pub struct BigQueryConfig {
    pub project_id: String,
    /// Opaque bearer token; passed through verbatim as `Authorization`.
    pub credentials: String,
    pub location: String,
    pub api_base: String,
}

impl BigQueryConfig {
    pub fn new(project_id: impl Into<String>, credentials: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            credentials: credentials.into(),
            location: DEFAULT_LOCATION.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

pub struct BigQueryClient {
    http: reqwest::Client,
    config: BigQueryConfig,
}

impl BigQueryClient {
    pub fn new(config: BigQueryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn location(&self) -> &str {
        &self.config.location
    }

    fn query_url(&self) -> String {
        format!(
            "{}/projects/{}/queries",
            self.config.api_base.trim_end_matches('/'),
            self.config.project_id
        )
    }

    async fn post_query(
        &self,
        body: &QueryRequestBody<'_>,
    ) -> Result<QueryResponseBody, RemoteQueryError> {
        tracing::debug!(dry_run = body.dry_run, "posting query to BigQuery");
        let response = self
            .http
            .post(self.query_url())
            .bearer_auth(&self.config.credentials)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(envelope) => envelope.error.message,
                Err(_) => text,
            };
            return Err(RemoteQueryError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl QueryClient for BigQueryClient {
    async fn execute(
        &self,
        query: &str,
        location: &str,
    ) -> Result<TabularResult, RemoteQueryError> {
        let body = QueryRequestBody {
            query,
            use_legacy_sql: false,
            location: Some(location),
            timeout_ms: Some(SERVICE_WAIT_MS),
            dry_run: false,
        };
        let response = self.post_query(&body).await?;
        table_from_response(response)
    }

    async fn dry_run_bytes(&self, query: &str) -> Result<u64, RemoteQueryError> {
        let body = QueryRequestBody {
            query,
            use_legacy_sql: false,
            location: Some(&self.config.location),
            timeout_ms: None,
            dry_run: true,
        };
        let response = self.post_query(&body).await?;
        bytes_from_response(response)
    }
}

// Wire types for jobs.query, reduced to the fields we read.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequestBody<'a> {
    query: &'a str,
    use_legacy_sql: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_ms: Option<u64>,
    dry_run: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponseBody {
    job_complete: Option<bool>,
    schema: Option<TableSchema>,
    #[serde(default)]
    rows: Vec<TableRow>,
    total_bytes_processed: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorProto>,
}

#[derive(Debug, Deserialize)]
struct TableSchema {
    fields: Vec<TableFieldSchema>,
}

#[derive(Debug, Deserialize)]
struct TableFieldSchema {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
}

#[derive(Debug, Deserialize)]
struct TableRow {
    #[serde(default)]
    f: Vec<TableCell>,
}

#[derive(Debug, Deserialize)]
struct TableCell {
    #[serde(default)]
    v: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ErrorProto {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorEnvelopeBody,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelopeBody {
    message: String,
}

fn check_complete(response: &QueryResponseBody) -> Result<(), RemoteQueryError> {
    if let Some(first) = response.errors.first() {
        return Err(RemoteQueryError::Failed {
            message: first.message.clone(),
        });
    }
    if response.job_complete == Some(false) {
        return Err(RemoteQueryError::Incomplete);
    }
    Ok(())
}

fn table_from_response(response: QueryResponseBody) -> Result<TabularResult, RemoteQueryError> {
    check_complete(&response)?;
    let schema = response
        .schema
        .ok_or_else(|| RemoteQueryError::Decode("response carried no schema".to_string()))?;

    let columns: Vec<Column> = schema
        .fields
        .iter()
        .map(|field| Column {
            name: field.name.clone(),
            field_type: FieldType::from_bigquery(&field.field_type),
        })
        .collect();

    let mut rows = Vec::with_capacity(response.rows.len());
    for row in response.rows {
        if row.f.len() != columns.len() {
            return Err(RemoteQueryError::Decode(format!(
                "row has {} cells but schema has {} columns",
                row.f.len(),
                columns.len()
            )));
        }
        let cells = row
            .f
            .into_iter()
            .zip(&columns)
            .map(|(cell, column)| decode_cell(cell.v, &column.field_type))
            .collect::<Result<Vec<Value>, _>>()?;
        rows.push(cells);
    }

    Ok(TabularResult { columns, rows })
}

fn bytes_from_response(response: QueryResponseBody) -> Result<u64, RemoteQueryError> {
    check_complete(&response)?;
    let raw = response.total_bytes_processed.ok_or_else(|| {
        RemoteQueryError::Decode("dry run response carried no totalBytesProcessed".to_string())
    })?;
    raw.parse::<u64>().map_err(|_| {
        RemoteQueryError::Decode(format!("totalBytesProcessed is not an integer: {raw:?}"))
    })
}

/// BigQuery encodes every scalar cell as a JSON string (or null); decode it
/// according to the column's declared type.
fn decode_cell(raw: serde_json::Value, field_type: &FieldType) -> Result<Value, RemoteQueryError> {
    let text = match raw {
        serde_json::Value::Null => return Ok(Value::Null),
        serde_json::Value::String(text) => text,
        other => {
            return Err(RemoteQueryError::Decode(format!(
                "unexpected cell encoding: {other}"
            )));
        }
    };

    match field_type {
        FieldType::Integer => text
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| RemoteQueryError::Decode(format!("not an integer: {text:?}"))),
        FieldType::Float => text
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| RemoteQueryError::Decode(format!("not a float: {text:?}"))),
        FieldType::Boolean => match text.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(RemoteQueryError::Decode(format!("not a boolean: {text:?}"))),
        },
        // Timestamps, dates and anything exotic stay textual.
        FieldType::String | FieldType::Timestamp | FieldType::Date | FieldType::Other(_) => {
            Ok(Value::String(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn response(value: serde_json::Value) -> QueryResponseBody {
        serde_json::from_value(value).expect("wire response")
    }

    #[test]
    fn decodes_schema_and_string_encoded_cells() {
        let table = table_from_response(response(json!({
            "jobComplete": true,
            "schema": { "fields": [
                { "name": "month", "type": "INTEGER" },
                { "name": "pm10", "type": "FLOAT" },
                { "name": "state", "type": "STRING" }
            ]},
            "rows": [
                { "f": [ { "v": "1" }, { "v": "21.4" }, { "v": "CA" } ] },
                { "f": [ { "v": "2" }, { "v": null }, { "v": "CA" } ] }
            ]
        })))
        .unwrap();

        assert_eq!(table.num_columns(), 3);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.rows[0][0], Value::Integer(1));
        assert_eq!(table.rows[0][1], Value::Float(21.4));
        assert_eq!(table.rows[1][1], Value::Null);
        assert_eq!(table.rows[1][2], Value::String("CA".to_string()));
    }

    #[test]
    fn empty_result_is_a_table_with_no_rows() {
        let table = table_from_response(response(json!({
            "jobComplete": true,
            "schema": { "fields": [ { "name": "year", "type": "INT64" } ] }
        })))
        .unwrap();
        assert!(table.is_empty());
        assert_eq!(table.num_columns(), 1);
    }

    #[test]
    fn in_band_errors_fail_the_call() {
        let err = table_from_response(response(json!({
            "jobComplete": true,
            "errors": [ { "message": "quota exceeded" } ]
        })))
        .unwrap_err();
        assert_matches!(err, RemoteQueryError::Failed { message } if message == "quota exceeded");
    }

    #[test]
    fn incomplete_job_fails_the_call() {
        let err = table_from_response(response(json!({ "jobComplete": false })))
            .unwrap_err();
        assert_matches!(err, RemoteQueryError::Incomplete);
    }

    #[test]
    fn dry_run_bytes_parse_the_string_encoded_count() {
        let bytes = bytes_from_response(response(json!({
            "jobComplete": true,
            "totalBytesProcessed": "5497558138"
        })))
        .unwrap();
        assert_eq!(bytes, 5_497_558_138);

        let err = bytes_from_response(response(json!({ "jobComplete": true }))).unwrap_err();
        assert_matches!(err, RemoteQueryError::Decode(_));
    }

    #[test]
    fn mismatched_row_width_is_a_decode_error() {
        let err = table_from_response(response(json!({
            "jobComplete": true,
            "schema": { "fields": [
                { "name": "a", "type": "STRING" },
                { "name": "b", "type": "STRING" }
            ]},
            "rows": [ { "f": [ { "v": "only one" } ] } ]
        })))
        .unwrap_err();
        assert_matches!(err, RemoteQueryError::Decode(_));
    }
}
