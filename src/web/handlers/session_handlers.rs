// src/web/handlers/session_handlers.rs
use crate::auth::{simulate_linkedin_login, LinkedInSession, OptionalSession, SessionError};
use crate::config::ScraperSettings;
use crate::linkedin::{render_mockup, ConnectionScraper, SearchResults, SearchVariant};
use crate::web::handlers::scrape_handlers::{categorize_error, required_company, run_search};
use crate::web::pages::{dashboard_page, login_page};
use crate::web::types::*;

use rocket::form::Form;
use rocket::http::{CookieJar, Status};
use rocket::response::content::RawHtml;
use rocket::response::status::Custom;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

const INVALID_CREDENTIALS: &str = "Invalid LinkedIn credentials";

pub fn home_handler() -> RawHtml<String> {
    RawHtml(login_page(None))
}

pub fn login_handler(
    form: Form<LoginForm>,
    jar: &CookieJar<'_>,
) -> Result<Redirect, RawHtml<String>> {
    let Some(cookies) = simulate_linkedin_login(&form.email, &form.password) else {
        warn!("Rejected login attempt for '{}'", form.email);
        return Err(RawHtml(login_page(Some(INVALID_CREDENTIALS))));
    };

    let session = LinkedInSession::new(form.email.trim().to_string(), cookies);
    if let Err(e) = session.store(jar) {
        error!("Failed to store session for {}: {}", session.email, e);
        return Err(RawHtml(login_page(Some(INVALID_CREDENTIALS))));
    }

    info!("User {} logged in", session.email);
    Ok(Redirect::to("/dashboard"))
}

pub async fn dashboard_handler(
    auth: OptionalSession,
    settings: &State<ScraperSettings>,
) -> Result<RawHtml<String>, Redirect> {
    let Some(session) = auth.session else {
        return Err(Redirect::to("/"));
    };

    let user_company = match ConnectionScraper::new(
        settings,
        SearchVariant::CompanyFacet,
        &session.cookies,
    ) {
        Ok(scraper) => scraper.get_user_company().await,
        Err(e) => {
            warn!("Could not build scraper for {}: {}", session.email, e);
            crate::linkedin::profile::UNKNOWN_COMPANY.to_string()
        }
    };

    Ok(RawHtml(dashboard_page(&session.email, &user_company)))
}

pub async fn search_handler(
    request: Json<SearchRequest>,
    session: Result<LinkedInSession, SessionError>,
    settings: &State<ScraperSettings>,
) -> Result<Json<SearchResponse>, Custom<Json<ErrorResponse>>> {
    let session = session.map_err(|e| {
        Custom(
            Status::Unauthorized,
            Json(ErrorResponse::new(
                e.message(),
                "AUTHENTICATION_ERROR",
                vec!["Log in from the home page first".to_string()],
            )),
        )
    })?;

    let Some(company) = required_company(request.company_name.as_deref()) else {
        return Err(Custom(
            Status::BadRequest,
            Json(ErrorResponse::new(
                "company_name is required",
                "MISSING_COMPANY",
                vec!["Provide company_name in the request body".to_string()],
            )),
        ));
    };

    info!("{} searching employees of {}", session.email, company);

    let results = match run_search(
        settings,
        SearchVariant::CompanyFacet,
        &session.cookies,
        &company,
        request.limit,
    )
    .await
    {
        Ok(results) => results,
        Err(e) => {
            let error_msg = format!("{:#}", e);
            let (error_code, _) = categorize_error(&error_msg);
            error!("Search for {} failed ({}): {}", company, error_code, error_msg);
            SearchResults::failed(company, error_msg)
        }
    };

    Ok(Json(SearchResponse {
        logged_out_ui: render_mockup(&results, false),
        logged_in_ui: render_mockup(&results, true),
        results,
    }))
}

pub fn logout_handler(jar: &CookieJar<'_>) -> Redirect {
    LinkedInSession::clear(jar);
    info!("Session cleared");
    Redirect::to("/")
}
