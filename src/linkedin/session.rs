// src/linkedin/session.rs
use anyhow::{Context, Result};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, COOKIE,
};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Builds the HTTP client used against LinkedIn: browser-like headers plus the caller's cookies.
pub struct SessionBuilder {
    cookies: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            cookies: HashMap::new(),
            timeout: None,
        }
    }

    pub fn with_cookies(mut self, cookies: &HashMap<String, String>) -> Self {
        self.cookies
            .extend(cookies.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `Cookie` header value, names sorted for a stable order.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }

        let mut pairs: Vec<_> = self.cookies.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        Some(
            pairs
                .into_iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    pub fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(
            HeaderName::from_static("upgrade-insecure-requests"),
            HeaderValue::from_static("1"),
        );

        if let Some(cookie) = self.cookie_header() {
            let value =
                HeaderValue::from_str(&cookie).context("Invalid characters in session cookies")?;
            headers.insert(COOKIE, value);
        }

        Ok(headers)
    }

    pub fn build(self) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(self.default_headers()?);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().context("Failed to create HTTP client")
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
