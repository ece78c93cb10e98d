use crate::catalog::{self, Topic, YEARS};
use crate::client::{BigQueryConfig, DEFAULT_API_BASE, DEFAULT_LOCATION};
use crate::error::ClimateQueryError;
use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Fully resolved application configuration: CLI arguments merged over an
/// optional config file, validated fail-fast before any remote call.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bigquery: BigQueryConfig,
    /// Region display name, e.g. `California`.
    pub state: String,
    pub year: i32,
    /// Topics to include in the batch, deduplicated, in request order.
    pub topics: Vec<Topic>,
    /// Execute the (costed) queries instead of only estimating.
    pub run: bool,
    /// Print fetched results as JSON instead of a summary.
    pub json: bool,
}

impl AppConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            project,
            credentials,
            location,
            api_base,
            state,
            year,
            topics,
            run,
            json,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let project = project
            .or(file_config.project)
            .context("a BigQuery project id is required (--project or config file)")?;
        let credentials = credentials
            .or(file_config.credentials)
            .context("BigQuery credentials are required (--credentials or config file)")?;
        let location = location
            .or(file_config.location)
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string());
        let api_base = api_base
            .or(file_config.api_base)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let state = state
            .or(file_config.state)
            .context("a state is required (--state or config file)")?;
        if catalog::code_for_name(&state).is_none() {
            return Err(ClimateQueryError::UnknownRegion(state).into());
        }

        let year = year
            .or(file_config.year)
            .context("a year is required (--year or config file)")?;
        anyhow::ensure!(
            YEARS.contains(&year),
            "year {} is outside the supported range {}..={}",
            year,
            YEARS.start(),
            YEARS.end()
        );

        let topics = match topics.or(file_config.topics) {
            Some(raw) => {
                let mut parsed = Vec::new();
                for name in raw {
                    let topic = Topic::from_str(name.trim())
                        .map_err(|_| ClimateQueryError::UnknownTopic(name.clone()))?;
                    if !parsed.contains(&topic) {
                        parsed.push(topic);
                    }
                }
                anyhow::ensure!(!parsed.is_empty(), "at least one topic must be selected");
                parsed
            }
            None => Topic::all().collect(),
        };

        Ok(Self {
            bigquery: BigQueryConfig {
                project_id: project,
                credentials,
                location,
                api_base,
            },
            state,
            year,
            topics,
            run,
            json,
        })
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "climate-query",
    about = "US climate statistics over BigQuery public datasets",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)",
        global = true
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "CLIMATE_QUERY_PROJECT",
        value_name = "ID",
        help = "BigQuery project to bill the queries to"
    )]
    pub project: Option<String>,

    #[arg(
        long,
        env = "CLIMATE_QUERY_CREDENTIALS",
        value_name = "TOKEN",
        hide_env_values = true,
        help = "OAuth bearer token for the BigQuery API"
    )]
    pub credentials: Option<String>,

    #[arg(
        long,
        env = "CLIMATE_QUERY_LOCATION",
        value_name = "LOC",
        help = "Processing location hint (defaults to US)"
    )]
    pub location: Option<String>,

    #[arg(
        long,
        env = "CLIMATE_QUERY_API_BASE",
        value_name = "URL",
        hide = true,
        help = "Override the BigQuery API base URL"
    )]
    pub api_base: Option<String>,

    #[arg(
        long,
        value_name = "NAME",
        help = "State display name, e.g. \"California\""
    )]
    pub state: Option<String>,

    #[arg(long, value_name = "YYYY", help = "Year of statistics (1990-2018)")]
    pub year: Option<i32>,

    #[arg(
        long,
        value_name = "TOPIC",
        value_delimiter = ',',
        help = "Comma-separated topics (temperature, pollution, precipitation); defaults to all"
    )]
    pub topics: Option<Vec<String>>,

    #[arg(
        long,
        help = "Execute the costed queries; without this flag only the dry-run estimate is printed"
    )]
    pub run: bool,

    #[arg(long, help = "Print fetched results as JSON")]
    pub json: bool,
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    project: Option<String>,
    credentials: Option<String>,
    location: Option<String>,
    api_base: Option<String>,
    state: Option<String>,
    year: Option<i32>,
    topics: Option<Vec<String>>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read config file {path:?}"))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {path:?}"))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {path:?}"))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}
