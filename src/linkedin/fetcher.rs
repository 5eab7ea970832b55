// src/linkedin/fetcher.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::extractor::CardExtractor;
use super::types::EmployeeCard;

const PEOPLE_SEARCH_PATH: &str = "/search/results/people/";

/// Query parameters for one people search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Faceted search on the current-company filter.
    CurrentCompany(String),
    /// Free text search.
    Keywords(String),
}

impl SearchQuery {
    pub fn params(&self, start: usize) -> Vec<(&'static str, String)> {
        match self {
            SearchQuery::CurrentCompany(company) => vec![
                ("currentCompany", format!("[\"{}\"]", company)),
                ("origin", "FACETED_SEARCH".to_string()),
                ("start", start.to_string()),
            ],
            SearchQuery::Keywords(keywords) => vec![
                ("keywords", keywords.clone()),
                ("origin", "GLOBAL_SEARCH_HEADER".to_string()),
                ("start", start.to_string()),
            ],
        }
    }
}

/// Outcome of requesting one results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetch {
    Page(String),
    Status(u16),
}

#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, query: &SearchQuery, start: usize) -> Result<PageFetch>;
}

/// reqwest-backed page source pointed at a LinkedIn host.
pub struct LinkedInClient {
    client: Client,
    base_url: String,
}

impl LinkedInClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a path on the LinkedIn host and return the body of a successful response.
    pub async fn get_html(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        response.text().await.context("Failed to read response body")
    }
}

#[async_trait]
impl PageSource for LinkedInClient {
    async fn fetch_page(&self, query: &SearchQuery, start: usize) -> Result<PageFetch> {
        let url = format!("{}{}", self.base_url, PEOPLE_SEARCH_PATH);
        debug!("Requesting {} start={}", url, start);

        let response = self
            .client
            .get(&url)
            .query(&query.params(start))
            .send()
            .await
            .context("Failed to reach LinkedIn search")?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Ok(PageFetch::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .context("Failed to read search results page")?;
        Ok(PageFetch::Page(body))
    }
}

/// Random pause between page requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub min: Duration,
    pub max: Duration,
}

impl Pacing {
    pub const NONE: Self = Self {
        min: Duration::ZERO,
        max: Duration::ZERO,
    };

    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.max.is_zero()
    }

    pub fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let millis = rand::thread_rng().gen_range(self.min.as_millis()..=self.max.as_millis());
        Duration::from_millis(millis as u64)
    }

    pub async fn pause(&self) {
        if self.is_disabled() {
            return;
        }
        let delay = self.next_delay();
        debug!("Pausing {:?} before next page", delay);
        tokio::time::sleep(delay).await;
    }
}

/// Bounded pagination over people search results.
#[derive(Debug, Clone, Copy)]
pub struct ResultFetcher {
    pub max_pages: usize,
    pub page_size: usize,
    pub pacing: Pacing,
}

impl ResultFetcher {
    pub fn new(max_pages: usize, page_size: usize, pacing: Pacing) -> Self {
        Self {
            max_pages,
            page_size,
            pacing,
        }
    }

    /// Collect at most `limit` cards in fetch order.
    ///
    /// Stops early on a non-200 page or a page without cards. Transport
    /// failures are returned as errors.
    pub async fn collect<S: PageSource + ?Sized>(
        &self,
        source: &S,
        query: &SearchQuery,
        extractor: &CardExtractor,
        company: &str,
        limit: usize,
    ) -> Result<Vec<EmployeeCard>> {
        let mut cards = Vec::new();
        let mut page = 0;

        while cards.len() < limit && page < self.max_pages {
            if page > 0 {
                self.pacing.pause().await;
            }

            let start = page * self.page_size;
            let body = match source.fetch_page(query, start).await? {
                PageFetch::Page(body) => body,
                PageFetch::Status(status) => {
                    warn!("Search page {} returned status {}, stopping", page, status);
                    break;
                }
            };

            let page_cards = extractor.parse_page(&body, company);
            if page_cards.is_empty() {
                info!("Search page {} had no result cards, stopping", page);
                break;
            }

            debug!("Page {} yielded {} cards", page, page_cards.len());
            cards.extend(page_cards);
            page += 1;
        }

        cards.truncate(limit);
        info!(
            "Collected {} cards for {} over {} page(s)",
            cards.len(),
            company,
            page
        );
        Ok(cards)
    }
}
