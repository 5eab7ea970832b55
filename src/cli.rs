// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use tracing::info;

use crate::config::ConfigManager;
use crate::linkedin::{render_mockup, ConnectionScraper, SearchVariant};

#[derive(Parser)]
#[command(name = "account-connections")]
#[command(about = "Find and rank your connections at a target company on LinkedIn")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Run one company search and print the result
    Search {
        #[arg(long)]
        company: String,

        #[arg(long)]
        limit: Option<usize>,

        /// Session cookie as name=value, repeatable
        #[arg(long = "cookie", value_parser = parse_cookie)]
        cookies: Vec<(String, String)>,

        #[arg(long, value_enum, default_value_t = VariantArg::Company)]
        variant: VariantArg,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Render the mockup in its logged-in form
        #[arg(long)]
        logged_in: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum VariantArg {
    Company,
    Keywords,
}

impl From<VariantArg> for SearchVariant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Company => SearchVariant::CompanyFacet,
            VariantArg::Keywords => SearchVariant::Keywords,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Mockup,
}

fn parse_cookie(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}

pub async fn run_search(
    config: &ConfigManager,
    company: &str,
    limit: Option<usize>,
    cookies: Vec<(String, String)>,
    variant: SearchVariant,
    format: OutputFormat,
    logged_in: bool,
) -> Result<String> {
    let cookies: HashMap<String, String> = cookies.into_iter().collect();
    info!("CLI search for {} with {} cookie(s)", company, cookies.len());

    let scraper = ConnectionScraper::new(&config.scraper, variant, &cookies)?;
    let results = scraper.search_company_employees(company, limit).await?;

    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&results).context("Failed to serialize results")
        }
        OutputFormat::Mockup => Ok(render_mockup(&results, logged_in)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie() {
        assert_eq!(
            parse_cookie("li_at=abc=def").unwrap(),
            ("li_at".to_string(), "abc=def".to_string())
        );
        assert!(parse_cookie("li_at").is_err());
        assert!(parse_cookie("=value").is_err());
    }

    #[test]
    fn test_search_command_args() {
        let cli = Cli::try_parse_from([
            "account-connections",
            "search",
            "--company",
            "Acme",
            "--cookie",
            "li_at=abc",
            "--cookie",
            "JSESSIONID=xyz",
            "--variant",
            "keywords",
            "--format",
            "mockup",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Search {
                company,
                cookies,
                variant,
                format,
                limit,
                logged_in,
            }) => {
                assert_eq!(company, "Acme");
                assert_eq!(cookies.len(), 2);
                assert_eq!(SearchVariant::from(variant), SearchVariant::Keywords);
                assert!(matches!(format, OutputFormat::Mockup));
                assert_eq!(limit, None);
                assert!(!logged_in);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_serve_is_default() {
        let cli = Cli::try_parse_from(["account-connections"]).unwrap();
        assert!(cli.command.is_none());
    }
}
