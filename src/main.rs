use account_connections::cli::{self, Cli, Command};
use account_connections::{start_web_server, ConfigManager};
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "account_connections=info,rocket=warn";

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // JSON file output only when LOG_FILE is set
    let file_layer = match std::env::var("LOG_FILE") {
        Ok(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        Err(_) => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = ConfigManager::load()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Environment: {}", config.environment);
            info!("Server: http://0.0.0.0:{}", config.port);
            start_web_server(config).await
        }
        Command::Search {
            company,
            limit,
            cookies,
            variant,
            format,
            logged_in,
        } => {
            let output = cli::run_search(
                &config,
                &company,
                limit,
                cookies,
                variant.into(),
                format,
                logged_in,
            )
            .await?;
            println!("{}", output);
            Ok(())
        }
    }
}
