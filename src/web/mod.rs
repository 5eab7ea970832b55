// src/web/mod.rs

pub mod handlers;
pub mod pages;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::auth::{LinkedInSession, OptionalSession, SessionError};
use crate::config::{ConfigManager, ScraperSettings};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::http::{CookieJar, Header, Status};
use rocket::response::content::RawHtml;
use rocket::response::status::Custom;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

// Session pages

#[get("/")]
pub fn home() -> RawHtml<String> {
    handlers::home_handler()
}

#[post("/login", data = "<form>")]
pub fn login(form: Form<LoginForm>, jar: &CookieJar<'_>) -> Result<Redirect, RawHtml<String>> {
    handlers::login_handler(form, jar)
}

#[get("/dashboard")]
pub async fn dashboard(
    auth: OptionalSession,
    settings: &State<ScraperSettings>,
) -> Result<RawHtml<String>, Redirect> {
    handlers::dashboard_handler(auth, settings).await
}

#[post("/search", data = "<request>")]
pub async fn search(
    request: Json<SearchRequest>,
    session: Result<LinkedInSession, SessionError>,
    settings: &State<ScraperSettings>,
) -> Result<Json<SearchResponse>, Custom<Json<ErrorResponse>>> {
    handlers::search_handler(request, session, settings).await
}

#[get("/logout")]
pub fn logout(jar: &CookieJar<'_>) -> Redirect {
    handlers::logout_handler(jar)
}

// Scraping API

#[post("/scrape", data = "<request>")]
pub async fn scrape(
    request: Json<ScrapeRequest>,
    settings: &State<ScraperSettings>,
) -> Result<Json<ScrapeResponse>, Custom<Json<ErrorResponse>>> {
    handlers::scrape_handler(request, settings).await
}

#[post("/api/scrape-company", data = "<request>")]
pub async fn scrape_company(
    request: Json<ScrapeRequest>,
    settings: &State<ScraperSettings>,
) -> Result<Json<CompanyScrapeResponse>, Custom<Json<CompanyScrapeError>>> {
    handlers::scrape_company_handler(request, settings).await
}

#[post("/api/test-scraper", data = "<request>")]
pub fn test_scraper(request: Option<Json<TestScraperRequest>>) -> Json<TestScraperResponse> {
    handlers::test_scraper_handler(request)
}

#[get("/health")]
pub fn health() -> Json<HealthResponse> {
    handlers::health_handler()
}

#[get("/api/health")]
pub fn api_health() -> Json<HealthResponse> {
    handlers::api_health_handler()
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Invalid request format",
        "BAD_REQUEST",
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(401)]
pub fn unauthorized() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Not authenticated",
        "AUTHENTICATION_ERROR",
        vec!["Log in from the home page first".to_string()],
    ))
}

#[rocket::catch(404)]
pub fn not_found(req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        format!("No route for {}", req.uri().path()),
        "NOT_FOUND",
        vec!["Check the endpoint path and method".to_string()],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable_entity() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Request body could not be processed",
        "VALIDATION_ERROR",
        vec![
            "Check field names and types".to_string(),
            "limit must be a positive integer".to_string(),
        ],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Internal server error",
        "INTERNAL_ERROR",
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

pub fn build_rocket(config: &ConfigManager) -> Rocket<Build> {
    let figment = rocket::Config::figment().merge(("port", config.port));

    rocket::custom(figment)
        .attach(Cors)
        .manage(config.scraper.clone())
        .register(
            "/",
            catchers![
                bad_request,
                unauthorized,
                not_found,
                unprocessable_entity,
                internal_error
            ],
        )
        .mount(
            "/",
            routes![
                home,
                login,
                dashboard,
                search,
                logout,
                scrape,
                scrape_company,
                test_scraper,
                health,
                api_health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    info!(
        "Starting LinkedIn connection search server on port {} ({})",
        config.port, config.environment
    );
    info!("LinkedIn base URL: {}", config.scraper.base_url);

    let _rocket = build_rocket(&config)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}
