use clap::Parser;
use climate_query::{AppConfig, CliArgs, LoggingConfig, init_logging, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = init_logging(LoggingConfig::from_env())?;

    let cli = CliArgs::parse();
    let config = AppConfig::from_args(cli)?;

    run(config).await
}
