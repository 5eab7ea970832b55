// src/web/handlers/system_handlers.rs
use crate::linkedin::{ConnectionDegree, Employee};
use crate::web::types::*;

use rocket::serde::json::Json;
use tracing::info;

const DEFAULT_TEST_COMPANY: &str = "Test Company";

pub fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "linkedin-scraper",
        version: None,
    })
}

pub fn api_health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "LinkedIn Scraping API",
        version: Some("1.0.0"),
    })
}

/// Fixed two-record payload for wiring up clients without touching LinkedIn.
pub fn test_scraper_handler(request: Option<Json<TestScraperRequest>>) -> Json<TestScraperResponse> {
    let company = request
        .and_then(|r| r.into_inner().company_name)
        .unwrap_or_else(|| DEFAULT_TEST_COMPANY.to_string());

    info!("Serving test scraper fixture for {}", company);

    let employees = vec![
        Employee {
            name: "John Smith".to_string(),
            title_company: format!("Senior Developer at {}", company),
            location: "San Francisco, CA".to_string(),
            profile_url: Some("https://linkedin.com/in/john-smith".to_string()),
            mutual_connections: 12,
            connection_degree: ConnectionDegree::Second,
            connection_strength: 110,
            can_message: true,
            can_connect: true,
            is_verified_account_manager: true,
        },
        Employee {
            name: "Sarah Johnson".to_string(),
            title_company: format!("Product Manager at {}", company),
            location: "New York, NY".to_string(),
            profile_url: Some("https://linkedin.com/in/sarah-johnson".to_string()),
            mutual_connections: 8,
            connection_degree: ConnectionDegree::Second,
            connection_strength: 90,
            can_message: true,
            can_connect: true,
            is_verified_account_manager: false,
        },
    ];

    Json(TestScraperResponse {
        success: true,
        company,
        total_found: employees.len(),
        employees,
        test_mode: true,
    })
}
