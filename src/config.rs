// src/config.rs
//! Configuration: environment variables with defaults, optionally overlaid by config.yaml

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::linkedin::fetcher::{Pacing, ResultFetcher};

const DEFAULT_PORT: u16 = 5000;

/// Hard ceiling on result pages fetched per search.
pub const MAX_PAGES: usize = 15;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub port: u16,
    pub scraper: ScraperSettings,
}

/// Knobs for the LinkedIn scraping pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperSettings {
    pub base_url: String,
    pub max_pages: usize,
    pub page_size: usize,
    pub default_limit: usize,
    pub max_results: usize,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.linkedin.com".to_string(),
            max_pages: 15,
            page_size: 10,
            default_limit: 50,
            max_results: 150,
            min_delay_ms: 1000,
            max_delay_ms: 3000,
            request_timeout_secs: 30,
        }
    }
}

impl ScraperSettings {
    pub fn pacing(&self) -> Pacing {
        Pacing::new(
            Duration::from_millis(self.min_delay_ms),
            Duration::from_millis(self.max_delay_ms),
        )
    }

    pub fn fetcher(&self) -> ResultFetcher {
        ResultFetcher::new(self.max_pages.min(MAX_PAGES), self.page_size, self.pacing())
    }

    /// Outbound request timeout; `0` disables it.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Keep pagination within `MAX_PAGES` and results within what those pages can hold.
    fn enforce_limits(&mut self) {
        if self.max_pages > MAX_PAGES {
            warn!(
                "max_pages {} exceeds the limit of {}, clamping",
                self.max_pages, MAX_PAGES
            );
            self.max_pages = MAX_PAGES;
        }

        let page_capacity = self.max_pages.saturating_mul(self.page_size);
        if self.max_results > page_capacity {
            warn!(
                "max_results {} exceeds {} pages of {}, clamping to {}",
                self.max_results, self.max_pages, self.page_size, page_capacity
            );
            self.max_results = page_capacity;
        }
    }

    /// Apply `LINKEDIN_BASE_URL`, `SCRAPER_MIN_DELAY_MS`, `SCRAPER_MAX_DELAY_MS` and `SCRAPER_TIMEOUT_SECS`.
    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = env("LINKEDIN_BASE_URL") {
            self.base_url = url;
        }
        if let Some(value) = env("SCRAPER_MIN_DELAY_MS") {
            self.min_delay_ms = value
                .parse()
                .context("SCRAPER_MIN_DELAY_MS must be a number of milliseconds")?;
        }
        if let Some(value) = env("SCRAPER_MAX_DELAY_MS") {
            self.max_delay_ms = value
                .parse()
                .context("SCRAPER_MAX_DELAY_MS must be a number of milliseconds")?;
        }
        if let Some(value) = env("SCRAPER_TIMEOUT_SECS") {
            self.request_timeout_secs = value
                .parse()
                .context("SCRAPER_TIMEOUT_SECS must be a number of seconds")?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct EnvironmentSection {
    port: Option<u16>,
    #[serde(default)]
    scraper: Option<ScraperSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentSection,
    #[serde(default)]
    production: EnvironmentSection,
}

impl ConfigManager {
    /// Load configuration from `config.yaml` (if present) and the process environment.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config.yaml"), |key| std::env::var(key).ok())
    }

    pub fn load_from(config_path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let environment = env("ENVIRONMENT").unwrap_or_else(|| "local".to_string());
        info!("Loading configuration for environment: {}", environment);

        let section = Self::read_section(config_path, &environment)?;

        let mut scraper = section.scraper.unwrap_or_default();
        scraper.apply_env(&env)?;
        scraper.enforce_limits();

        let port = match env("ROCKET_PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?,
            None => section.port.unwrap_or(DEFAULT_PORT),
        };

        Ok(Self {
            environment,
            port,
            scraper,
        })
    }

    fn read_section(config_path: &Path, environment: &str) -> Result<EnvironmentSection> {
        if !config_path.exists() {
            return Ok(EnvironmentSection::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        info!("Loaded {}", config_path.display());
        Ok(match environment {
            "production" => file.production,
            _ => file.local,
        })
    }
}
