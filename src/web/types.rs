// src/web/types.rs
use rocket::form::FromForm;
use rocket::serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::linkedin::{Capabilities, Employee, SearchResults};

#[derive(Serialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, error_code: &str, suggestions: Vec<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            error_code: error_code.to_string(),
            suggestions,
        }
    }
}

#[derive(FromForm)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct SearchRequest {
    pub company_name: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ScrapeRequest {
    pub company_name: Option<String>,
    pub limit: Option<usize>,
    #[serde(default)]
    pub cookies: HashMap<String, String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(crate = "rocket::serde")]
pub struct TestScraperRequest {
    pub company_name: Option<String>,
}

/// Session search: raw results plus both mockup renderings.
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SearchResponse {
    pub results: SearchResults,
    pub logged_out_ui: String,
    pub logged_in_ui: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ScrapeResponse {
    pub company: String,
    pub total_found: usize,
    pub employees: Vec<Employee>,
    pub success: bool,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CompanyScrapeResponse {
    pub success: bool,
    pub company: String,
    pub total_found: usize,
    pub employees: Vec<Employee>,
    pub capabilities: Capabilities,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CompanyScrapeError {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    pub company: String,
    pub total_found: usize,
    pub employees: Vec<Employee>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TestScraperResponse {
    pub success: bool,
    pub company: String,
    pub total_found: usize,
    pub employees: Vec<Employee>,
    pub test_mode: bool,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'static str>,
}
