//! Slack Web API status backend.
//!
//! Sets the authenticated user's profile status through
//! `users.profile.set` and reads it back with `users.profile.get`.
//!
//! API docs: https://api.slack.com/methods/users.profile.set
//! Auth: `Authorization: Bearer {user token}` (needs `users.profile:write`).
//! Rate limit: Tier 3; throttled calls return HTTP 429 or
//! `{"ok": false, "error": "ratelimited"}`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::StatusSetter;
use crate::types::{Status, StatusError, RATE_LIMITED_TOKEN};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const BASE_URL: &str = "https://slack.com/api";
const BACKEND_NAME: &str = "slack";

// ---------------------------------------------------------------------------
// API types
// ---------------------------------------------------------------------------

/// Envelope every Slack Web API method responds with.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    profile: Option<Status>,
}

#[derive(Debug, Serialize)]
struct ProfileUpdate<'a> {
    profile: &'a Status,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Slack client bound to one user token.
pub struct SlackClient {
    http: Client,
    token: SecretString,
    base_url: String,
}

impl SlackClient {
    pub fn new(token: SecretString, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent(concat!("celebration/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client for Slack")?;

        Ok(Self {
            http,
            token,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API root (for proxies or tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn request(&self, method: Method, api_method: &str) -> RequestBuilder {
        let url = format!("{}/{api_method}", self.base_url);
        self.http
            .request(method, url)
            .bearer_auth(self.token.expose_secret())
    }

    /// Set the user's profile status.
    pub async fn set_profile(&self, status: &Status) -> Result<(), StatusError> {
        debug!(status = %status, "Calling users.profile.set");

        let resp = self
            .request(Method::POST, "users.profile.set")
            .json(&ProfileUpdate { profile: status })
            .send()
            .await
            .map_err(|e| StatusError::Http(e.to_string()))?;

        let code = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| StatusError::Http(e.to_string()))?;

        parse_response(code, &body).map(|_| ())
    }

    /// Fetch the user's current profile status.
    pub async fn get_profile(&self) -> Result<Status, StatusError> {
        let resp = self
            .request(Method::GET, "users.profile.get")
            .send()
            .await
            .map_err(|e| StatusError::Http(e.to_string()))?;

        let code = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| StatusError::Http(e.to_string()))?;

        parse_response(code, &body).map(|r| r.profile.unwrap_or_default())
    }
}

/// Map an HTTP status and body onto the error taxonomy.
fn parse_response(code: StatusCode, body: &str) -> Result<ApiResponse, StatusError> {
    if code == StatusCode::TOO_MANY_REQUESTS {
        warn!("Slack returned 429");
        return Err(StatusError::RateLimited {
            backend: BACKEND_NAME.to_string(),
            detail: format!("HTTP {code}"),
        });
    }

    if !code.is_success() {
        return Err(StatusError::Http(format!("HTTP {code}: {}", body.trim())));
    }

    let parsed: ApiResponse =
        serde_json::from_str(body).map_err(|e| StatusError::Decode(e.to_string()))?;

    if parsed.ok {
        return Ok(parsed);
    }

    let error = parsed.error.unwrap_or_default();
    if error == RATE_LIMITED_TOKEN {
        Err(StatusError::RateLimited {
            backend: BACKEND_NAME.to_string(),
            detail: error,
        })
    } else {
        Err(StatusError::Api(error))
    }
}

#[async_trait]
impl StatusSetter for SlackClient {
    async fn set_status(&self, status: &Status) -> Result<(), StatusError> {
        self.set_profile(status).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
