// src/linkedin/scraper.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

use super::extractor::{CardExtractor, CardSelectors};
use super::fetcher::{LinkedInClient, PageSource, ResultFetcher, SearchQuery};
use super::profile::{extract_current_position, OWN_PROFILE_PATH, UNKNOWN_COMPANY};
use super::scoring::{prioritize, StrengthFormula};
use super::session::SessionBuilder;
use super::types::{Employee, SearchResults};
use crate::config::ScraperSettings;

/// Which people-search flavour to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchVariant {
    /// Current-company facet, insight-based mutual counts.
    #[default]
    CompanyFacet,
    /// Keyword search, simulated mutual counts.
    Keywords,
}

impl SearchVariant {
    pub fn selectors(&self) -> &'static CardSelectors {
        match self {
            SearchVariant::CompanyFacet => &CardSelectors::COMPANY_FACET,
            SearchVariant::Keywords => &CardSelectors::KEYWORDS,
        }
    }

    pub fn formula(&self) -> StrengthFormula {
        match self {
            SearchVariant::CompanyFacet => StrengthFormula::COMPANY_FACET,
            SearchVariant::Keywords => StrengthFormula::KEYWORDS,
        }
    }

    pub fn query(&self, company: &str) -> SearchQuery {
        match self {
            SearchVariant::CompanyFacet => SearchQuery::CurrentCompany(company.to_string()),
            SearchVariant::Keywords => SearchQuery::Keywords(company.to_string()),
        }
    }
}

impl std::str::FromStr for SearchVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "company" | "company_facet" | "facet" => Ok(SearchVariant::CompanyFacet),
            "keywords" | "keyword" => Ok(SearchVariant::Keywords),
            other => anyhow::bail!("Unknown search variant: {}. Use company or keywords", other),
        }
    }
}

/// Search, score and rank employees of a company for one set of session cookies.
pub struct ConnectionScraper<S: PageSource = LinkedInClient> {
    source: S,
    fetcher: ResultFetcher,
    extractor: CardExtractor,
    variant: SearchVariant,
    default_limit: usize,
    max_results: usize,
}

impl ConnectionScraper<LinkedInClient> {
    pub fn new(
        settings: &ScraperSettings,
        variant: SearchVariant,
        cookies: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut session = SessionBuilder::new().with_cookies(cookies);
        if let Some(timeout) = settings.request_timeout() {
            session = session.with_timeout(timeout);
        }
        let client = session.build()?;

        Self::with_source(
            LinkedInClient::new(client, settings.base_url.clone()),
            settings,
            variant,
        )
    }

    /// Company of the logged-in user, read from their own profile.
    pub async fn get_user_company(&self) -> String {
        match self.source.get_html(OWN_PROFILE_PATH).await {
            Ok(html) => extract_current_position(&html)
                .company
                .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            Err(e) => {
                warn!("Failed to load own profile: {}", e);
                UNKNOWN_COMPANY.to_string()
            }
        }
    }
}

impl<S: PageSource> ConnectionScraper<S> {
    pub fn with_source(
        source: S,
        settings: &ScraperSettings,
        variant: SearchVariant,
    ) -> Result<Self> {
        let extractor =
            CardExtractor::new(variant.selectors()).context("Failed to build card extractor")?;

        Ok(Self {
            source,
            fetcher: settings.fetcher(),
            extractor,
            variant,
            default_limit: settings.default_limit,
            max_results: settings.max_results,
        })
    }

    pub fn variant(&self) -> SearchVariant {
        self.variant
    }

    /// Requested limit, defaulted and clamped to the configured maximum.
    pub fn effective_limit(&self, limit: Option<usize>) -> usize {
        limit.unwrap_or(self.default_limit).min(self.max_results)
    }

    pub async fn search_company_employees(
        &self,
        company: &str,
        limit: Option<usize>,
    ) -> Result<SearchResults> {
        let limit = self.effective_limit(limit);
        info!(
            "Searching employees of {} ({:?}, limit {})",
            company, self.variant, limit
        );

        let cards = self
            .fetcher
            .collect(
                &self.source,
                &self.variant.query(company),
                &self.extractor,
                company,
                limit,
            )
            .await
            .with_context(|| format!("Scraping failed for {}", company))?;

        let formula = self.variant.formula();
        let employees: Vec<Employee> = cards
            .into_iter()
            .map(|card| Employee::from_card(card, &formula))
            .collect();

        let results = SearchResults::new(company.to_string(), prioritize(employees));
        info!("Found {} employees at {}", results.total_found, company);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkedin::fetcher::PageFetch;
    use crate::linkedin::types::ConnectionDegree;

    struct OnePage(String);

    #[async_trait]
    impl PageSource for OnePage {
        async fn fetch_page(&self, _query: &SearchQuery, start: usize) -> Result<PageFetch> {
            if start == 0 {
                Ok(PageFetch::Page(self.0.clone()))
            } else {
                Ok(PageFetch::Status(404))
            }
        }
    }

    struct Unreachable;

    #[async_trait]
    impl PageSource for Unreachable {
        async fn fetch_page(&self, _query: &SearchQuery, _start: usize) -> Result<PageFetch> {
            anyhow::bail!("connection refused")
        }
    }

    fn card(name: &str, degree: &str, mutual: u32) -> String {
        format!(
            r#"<li class="reusable-search__result-container">
                 <span class="entity-result__title-text"><a href="/in/{0}"><span aria-hidden="true">{0}</span></a></span>
                 <span class="dist-value">{1}</span>
                 <p class="entity-result__insight">{2} mutual connections</p>
               </li>"#,
            name, degree, mutual
        )
    }

    fn settings() -> ScraperSettings {
        ScraperSettings {
            min_delay_ms: 0,
            max_delay_ms: 0,
            ..ScraperSettings::default()
        }
    }

    #[tokio::test]
    async fn test_search_scores_and_prioritizes() {
        let html = format!(
            "<ul>{}{}{}</ul>",
            card("Third", "3rd", 20),
            card("Second", "2nd", 1),
            card("First", "1st", 0)
        );
        let scraper =
            ConnectionScraper::with_source(OnePage(html), &settings(), SearchVariant::CompanyFacet)
                .unwrap();

        let results = scraper.search_company_employees("Acme", None).await.unwrap();
        assert_eq!(results.company, "Acme");
        assert_eq!(results.total_found, 3);

        let names: Vec<&str> = results.employees.iter().map(|e| e.name.as_str()).collect();
        // 3rd with 20 mutuals: 10 + 100 = 110 beats 2nd with 1: 50 + 5 = 55
        assert_eq!(names, vec!["Third", "First", "Second"]);
        assert_eq!(results.employees[0].connection_strength, 110);
        assert_eq!(results.employees[1].connection_degree, ConnectionDegree::First);
        assert!(results.error.is_none());
    }

    #[tokio::test]
    async fn test_search_respects_limit() {
        let html = format!(
            "<ul>{}{}{}</ul>",
            card("a", "2nd", 0),
            card("b", "1st", 0),
            card("c", "2nd", 0)
        );
        let scraper =
            ConnectionScraper::with_source(OnePage(html), &settings(), SearchVariant::CompanyFacet)
                .unwrap();

        let results = scraper.search_company_employees("Acme", Some(2)).await.unwrap();
        let names: Vec<&str> = results.employees.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_search_error_carries_context() {
        let scraper =
            ConnectionScraper::with_source(Unreachable, &settings(), SearchVariant::Keywords)
                .unwrap();

        let err = scraper
            .search_company_employees("Acme", None)
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("connection refused"));
    }

    #[test]
    fn test_effective_limit() {
        let scraper =
            ConnectionScraper::with_source(Unreachable, &settings(), SearchVariant::CompanyFacet)
                .unwrap();
        assert_eq!(scraper.variant(), SearchVariant::CompanyFacet);
        assert_eq!(scraper.effective_limit(None), 50);
        assert_eq!(scraper.effective_limit(Some(10)), 10);
        assert_eq!(scraper.effective_limit(Some(10_000)), 150);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(
            "company".parse::<SearchVariant>().unwrap(),
            SearchVariant::CompanyFacet
        );
        assert_eq!(
            "Keywords".parse::<SearchVariant>().unwrap(),
            SearchVariant::Keywords
        );
        assert!("graph".parse::<SearchVariant>().is_err());
    }
}
