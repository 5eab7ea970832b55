// src/auth.rs
use rocket::http::{Cookie, CookieJar, Status};
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use std::collections::HashMap;
use tracing::{info, warn};

const COOKIES_KEY: &str = "linkedin_cookies";
const EMAIL_KEY: &str = "user_email";

/// Stand-in for a LinkedIn credential exchange: any non-empty pair is accepted.
pub fn simulate_linkedin_login(email: &str, password: &str) -> Option<HashMap<String, String>> {
    if email.trim().is_empty() || password.is_empty() {
        return None;
    }

    Some(HashMap::from([
        ("li_at".to_string(), "mock_linkedin_session_cookie".to_string()),
        ("JSESSIONID".to_string(), "mock_session_id".to_string()),
    ]))
}

/// LinkedIn cookies and email held in the encrypted session cookie.
#[derive(Debug, Clone)]
pub struct LinkedInSession {
    pub email: String,
    pub cookies: HashMap<String, String>,
}

impl LinkedInSession {
    pub fn new(email: String, cookies: HashMap<String, String>) -> Self {
        Self { email, cookies }
    }

    pub fn store(&self, jar: &CookieJar<'_>) -> anyhow::Result<()> {
        let cookies = serde_json::to_string(&self.cookies)?;
        jar.add_private(Cookie::new(COOKIES_KEY, cookies));
        jar.add_private(Cookie::new(EMAIL_KEY, self.email.clone()));
        Ok(())
    }

    pub fn clear(jar: &CookieJar<'_>) {
        jar.remove_private(COOKIES_KEY);
        jar.remove_private(EMAIL_KEY);
    }

    fn from_jar(jar: &CookieJar<'_>) -> Result<Self, SessionError> {
        let raw = jar
            .get_private(COOKIES_KEY)
            .ok_or(SessionError::NotAuthenticated)?;

        let cookies: HashMap<String, String> =
            serde_json::from_str(raw.value()).map_err(|e| {
                warn!("Discarding unreadable session cookie: {}", e);
                SessionError::Corrupted
            })?;

        let email = jar
            .get_private(EMAIL_KEY)
            .map(|c| c.value().to_string())
            .unwrap_or_default();

        Ok(Self { email, cookies })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    NotAuthenticated,
    Corrupted,
}

impl SessionError {
    pub fn message(&self) -> &'static str {
        match self {
            SessionError::NotAuthenticated => "Not authenticated",
            SessionError::Corrupted => "Session data is unreadable, please log in again",
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for LinkedInSession {
    type Error = SessionError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match LinkedInSession::from_jar(req.cookies()) {
            Ok(session) => {
                info!("Request from session of {}", session.email);
                Outcome::Success(session)
            }
            Err(e) => Outcome::Error((Status::Unauthorized, e)),
        }
    }
}

// Guard that never fails; handlers decide what to do without a session
pub struct OptionalSession {
    pub session: Option<LinkedInSession>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for OptionalSession {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(OptionalSession {
            session: LinkedInSession::from_jar(req.cookies()).ok(),
        })
    }
}
