//! GitHub REST client - implementation of the `GitHubSource` port.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GitHubClientConfig::new()
//!     .with_token(token)
//!     .with_base_url("https://api.github.com")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let client = GitHubClient::new(config)?;
//! ```
//!
//! # Errors
//!
//! Every failure is translated into a [`GitHubError`]; nothing is retried.
//! A 403 whose `X-RateLimit-Remaining` header is `0` becomes
//! `RateLimited` with the wait computed from `X-RateLimit-Reset`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::foundation::Timestamp;
use crate::domain::github::{LanguageCounts, RepoRecord, UserRecord};
use crate::ports::{GitHubError, GitHubSource};

/// Default GitHub API root.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// GitHub caps `per_page` at this value.
pub const MAX_PAGE_SIZE: usize = 100;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const GITHUB_USER_AGENT: &str = "CodeCV-App";
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Configuration for the GitHub client.
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    /// Personal access token; anonymous requests when absent.
    token: Option<Secret<String>>,
    /// API root (default: https://api.github.com).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GitHubClientConfig {
    /// Anonymous configuration against the public API with a 10s timeout.
    pub fn new() -> Self {
        Self {
            token: None,
            base_url: DEFAULT_GITHUB_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the access token. Blank tokens are ignored.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.trim().is_empty() {
            None
        } else {
            Some(Secret::new(token))
        };
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether requests will be authenticated.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl Default for GitHubClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the GitHub REST API.
pub struct GitHubClient {
    config: GitHubClientConfig,
    base_url: Url,
    client: Client,
}

impl GitHubClient {
    /// Creates a client; fails only on an unusable base URL or TLS backend.
    pub fn new(config: GitHubClientConfig) -> Result<Self, GitHubError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GitHubError::Transport(format!("invalid base URL: {}", e)))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GitHubError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Builds an endpoint URL with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GitHubError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GitHubError::Transport("base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET and decodes the JSON body into `T`. `resource` names the
    /// user or repository in a `NotFound`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, GitHubError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(endpoint = %url.path(), "GitHub API request");

        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, GITHUB_USER_AGENT)
            .query(query);
        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("token {}", token.expose_secret()));
        }

        let response = request.send().await.map_err(|e| self.translate_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error = translate_status(status, response.headers(), resource, now_unix_secs());
            tracing::warn!(endpoint = %url.path(), status = status.as_u16(), error = %error, "GitHub API request failed");
            return Err(error);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.translate_send_error(e))?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(endpoint = %url.path(), error = %e, "GitHub API response did not match expected shape");
            GitHubError::InvalidResponse(e.to_string())
        })
    }

    fn translate_send_error(&self, error: reqwest::Error) -> GitHubError {
        if error.is_timeout() {
            GitHubError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if error.is_connect() {
            GitHubError::Transport(format!("connection failed: {}", error))
        } else {
            GitHubError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl GitHubSource for GitHubClient {
    async fn fetch_user(&self, username: &str) -> Result<UserRecord, GitHubError> {
        self.get_json(username, &["users", username], &[]).await
    }

    async fn fetch_repositories(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<RepoRecord>, GitHubError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let per_page = limit.min(MAX_PAGE_SIZE);
        let mut repos: Vec<RepoRecord> = Vec::with_capacity(limit);
        let mut page = 1u32;

        while repos.len() < limit {
            let query = [
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
                ("sort", "updated".to_string()),
                ("direction", "desc".to_string()),
                ("type", "owner".to_string()),
            ];
            let batch: Vec<RepoRecord> = self
                .get_json(username, &["users", username, "repos"], &query)
                .await?;
            let received = batch.len();
            repos.extend(batch);

            // A short (or empty) page is the last one.
            if received < per_page {
                break;
            }
            page += 1;
        }

        repos.truncate(limit);
        Ok(repos)
    }

    async fn fetch_repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageCounts, GitHubError> {
        self.get_json(&format!("{}/{}", owner, repo), &["repos", owner, repo, "languages"], &[])
            .await
    }
}

fn now_unix_secs() -> i64 {
    Timestamp::now().as_unix_secs()
}

/// Maps a non-success response to a [`GitHubError`].
pub(crate) fn translate_status(
    status: StatusCode,
    headers: &HeaderMap,
    resource: &str,
    now_secs: i64,
) -> GitHubError {
    match status {
        StatusCode::NOT_FOUND => GitHubError::NotFound {
            resource: resource.to_string(),
        },
        StatusCode::FORBIDDEN if quota_exhausted(headers) => GitHubError::RateLimited {
            retry_after: retry_after(headers, now_secs),
        },
        other => GitHubError::Upstream {
            status: other.as_u16(),
        },
    }
}

fn quota_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get(RATE_LIMIT_REMAINING)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim() == "0")
        .unwrap_or(false)
}

/// `max(0, reset - now)`; a missing or unparsable reset counts as epoch 0.
fn retry_after(headers: &HeaderMap, now_secs: i64) -> Duration {
    let reset = headers
        .get(RATE_LIMIT_RESET)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(0);
    Duration::from_secs(reset.saturating_sub(now_secs).max(0) as u64)
}
