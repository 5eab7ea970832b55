// src/web/handlers/scrape_handlers.rs
use crate::config::ScraperSettings;
use crate::linkedin::{ConnectionScraper, SearchResults, SearchVariant};
use crate::web::types::*;

use anyhow::Result;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use std::collections::HashMap;
use tracing::{error, info};

/// Build a scraper for the given cookies and run one company search.
pub(crate) async fn run_search(
    settings: &ScraperSettings,
    variant: SearchVariant,
    cookies: &HashMap<String, String>,
    company: &str,
    limit: Option<usize>,
) -> Result<SearchResults> {
    let scraper = ConnectionScraper::new(settings, variant, cookies)?;
    scraper.search_company_employees(company, limit).await
}

/// Trimmed, non-empty company name from a request body.
pub(crate) fn required_company(company_name: Option<&str>) -> Option<String> {
    company_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

pub async fn scrape_handler(
    request: Json<ScrapeRequest>,
    settings: &State<ScraperSettings>,
) -> Result<Json<ScrapeResponse>, Custom<Json<ErrorResponse>>> {
    let Some(company) = required_company(request.company_name.as_deref()) else {
        return Err(Custom(
            Status::BadRequest,
            Json(ErrorResponse::new(
                "Company name is required",
                "MISSING_COMPANY",
                vec!["Provide company_name in the request body".to_string()],
            )),
        ));
    };

    info!("Keyword scrape requested for {}", company);

    match run_search(
        settings,
        SearchVariant::Keywords,
        &request.cookies,
        &company,
        request.limit,
    )
    .await
    {
        Ok(results) => Ok(Json(ScrapeResponse {
            company: results.company,
            total_found: results.total_found,
            employees: results.employees,
            success: true,
        })),
        Err(e) => {
            let error_msg = format!("{:#}", e);
            error!("Keyword scrape failed for {}: {}", company, error_msg);
            let (error_code, suggestions) = categorize_error(&error_msg);
            Err(Custom(
                Status::InternalServerError,
                Json(ErrorResponse::new(error_msg, &error_code, suggestions)),
            ))
        }
    }
}

pub async fn scrape_company_handler(
    request: Json<ScrapeRequest>,
    settings: &State<ScraperSettings>,
) -> Result<Json<CompanyScrapeResponse>, Custom<Json<CompanyScrapeError>>> {
    let company = required_company(request.company_name.as_deref());

    let validation_error = |error: &str, error_code: &str, suggestion: &str| {
        Custom(
            Status::BadRequest,
            Json(CompanyScrapeError {
                success: false,
                error: error.to_string(),
                error_code: error_code.to_string(),
                suggestions: vec![suggestion.to_string()],
                company: request.company_name.clone().unwrap_or_default(),
                total_found: 0,
                employees: Vec::new(),
            }),
        )
    };

    let Some(company) = company else {
        return Err(validation_error(
            "company_name is required",
            "MISSING_COMPANY",
            "Provide company_name in the request body",
        ));
    };

    if request.cookies.is_empty() {
        return Err(validation_error(
            "LinkedIn cookies are required",
            "MISSING_COOKIES",
            "Copy the li_at and JSESSIONID cookies from a logged-in LinkedIn session",
        ));
    }

    info!(
        "Company scrape requested for {} with {} cookie(s)",
        company,
        request.cookies.len()
    );

    match run_search(
        settings,
        SearchVariant::CompanyFacet,
        &request.cookies,
        &company,
        request.limit,
    )
    .await
    {
        Ok(results) => Ok(Json(CompanyScrapeResponse {
            success: true,
            company: results.company,
            total_found: results.total_found,
            employees: results.employees,
            capabilities: results.capabilities,
        })),
        Err(e) => {
            let error_msg = format!("{:#}", e);
            error!("Company scrape failed for {}: {}", company, error_msg);
            let (error_code, suggestions) = categorize_error(&error_msg);
            Err(Custom(
                Status::InternalServerError,
                Json(CompanyScrapeError {
                    success: false,
                    error: error_msg,
                    error_code,
                    suggestions,
                    company,
                    total_found: 0,
                    employees: Vec::new(),
                }),
            ))
        }
    }
}

pub(crate) fn categorize_error(error_msg: &str) -> (String, Vec<String>) {
    let lowered = error_msg.to_lowercase();

    if lowered.contains("timed out") || lowered.contains("timeout") {
        (
            "TIMEOUT_ERROR".to_string(),
            vec![
                "LinkedIn took too long to respond".to_string(),
                "Try again with a smaller limit".to_string(),
            ],
        )
    } else if lowered.contains("failed to reach")
        || lowered.contains("error sending request")
        || lowered.contains("connection refused")
        || lowered.contains("dns")
    {
        (
            "NETWORK_ERROR".to_string(),
            vec![
                "Check network connectivity to LinkedIn".to_string(),
                "Try again in a few moments".to_string(),
            ],
        )
    } else if lowered.contains("session cookies") {
        (
            "INVALID_COOKIES".to_string(),
            vec![
                "Cookie values must be plain header-safe text".to_string(),
                "Copy the cookies again from your browser".to_string(),
            ],
        )
    } else if lowered.contains("scraping failed") || lowered.contains("search results page") {
        (
            "SCRAPING_ERROR".to_string(),
            vec![
                "LinkedIn may be blocking automated requests".to_string(),
                "Refresh your LinkedIn session cookies".to_string(),
                "Wait before retrying to respect rate limits".to_string(),
            ],
        )
    } else {
        (
            "INTERNAL_ERROR".to_string(),
            vec![
                "Try again in a few moments".to_string(),
                "Contact support if the problem persists".to_string(),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_timeout_before_network() {
        let (code, _) = categorize_error(
            "Scraping failed for Acme: Failed to reach LinkedIn search: operation timed out",
        );
        assert_eq!(code, "TIMEOUT_ERROR");
    }

    #[test]
    fn test_categorize_network() {
        let (code, suggestions) = categorize_error(
            "Scraping failed for Acme: Failed to reach LinkedIn search: error sending request",
        );
        assert_eq!(code, "NETWORK_ERROR");
        assert!(!suggestions.is_empty());
    }

    #[test]
    fn test_categorize_cookies_and_scraping() {
        assert_eq!(
            categorize_error("Invalid characters in session cookies").0,
            "INVALID_COOKIES"
        );
        assert_eq!(
            categorize_error("Scraping failed for Acme: Failed to read search results page").0,
            "SCRAPING_ERROR"
        );
        assert_eq!(categorize_error("something odd").0, "INTERNAL_ERROR");
    }

    #[test]
    fn test_required_company() {
        assert_eq!(required_company(Some("  Acme ")), Some("Acme".to_string()));
        assert_eq!(required_company(Some("   ")), None);
        assert_eq!(required_company(None), None);
    }
}
