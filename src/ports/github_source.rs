//! GitHubSource port - read access to the GitHub REST API.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::github::{LanguageCounts, RepoRecord, UserRecord};

/// Failures talking to GitHub. The client never retries; callers decide.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GitHubError {
    /// The request did not complete within the configured timeout.
    #[error("GitHub API request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// HTTP 404: user or repository does not exist.
    #[error("GitHub resource not found: {resource}")]
    NotFound {
        /// Path segment that was requested.
        resource: String,
    },

    /// HTTP 403 with the quota exhausted.
    #[error("GitHub API rate limit exhausted, resets in {}s", retry_after.as_secs())]
    RateLimited {
        /// Time until the quota resets; never negative.
        retry_after: Duration,
    },

    /// Any other non-success status.
    #[error("GitHub API error: HTTP {status}")]
    Upstream {
        /// HTTP status code.
        status: u16,
    },

    /// Connection-level failure (DNS, refused, reset, TLS).
    #[error("network error: {0}")]
    Transport(String),

    /// The body did not match the expected record shape.
    #[error("unexpected GitHub response: {0}")]
    InvalidResponse(String),
}

impl GitHubError {
    /// Whole minutes until a rate limit resets, rounded down.
    pub fn retry_after_minutes(&self) -> Option<u64> {
        match self {
            GitHubError::RateLimited { retry_after } => Some(retry_after.as_secs() / 60),
            _ => None,
        }
    }

    /// Transient failures that may succeed when retried later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GitHubError::Timeout { .. } | GitHubError::Transport(_) | GitHubError::RateLimited { .. }
        )
    }
}

impl From<GitHubError> for DomainError {
    fn from(err: GitHubError) -> Self {
        match &err {
            GitHubError::NotFound { resource } => DomainError::new(
                ErrorCode::GitHubUserNotFound,
                format!("GitHub user not found: {}", resource),
            ),
            GitHubError::RateLimited { retry_after } => DomainError::new(
                ErrorCode::RateLimited,
                format!(
                    "GitHub API rate limit exhausted. Try again in {} minutes",
                    retry_after.as_secs() / 60
                ),
            )
            .with_detail("retry_after_secs", retry_after.as_secs().to_string()),
            GitHubError::Timeout { .. } | GitHubError::Transport(_) => DomainError::new(
                ErrorCode::UpstreamUnavailable,
                "GitHub is temporarily unreachable, please try again later",
            ),
            GitHubError::Upstream { status } => DomainError::new(
                ErrorCode::UpstreamError,
                format!("GitHub API error: HTTP {}", status),
            )
            .with_detail("status", status.to_string()),
            GitHubError::InvalidResponse(_) => DomainError::new(
                ErrorCode::UpstreamError,
                "GitHub returned an unexpected response",
            ),
        }
    }
}

/// Read operations against GitHub used by the sync flow.
#[async_trait]
pub trait GitHubSource: Send + Sync {
    /// Fetches a user account.
    async fn fetch_user(&self, username: &str) -> Result<UserRecord, GitHubError>;

    /// Fetches up to `limit` of the user's own repositories, most recently
    /// updated first, following pagination.
    async fn fetch_repositories(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<RepoRecord>, GitHubError>;

    /// Fetches the byte count per language of one repository.
    async fn fetch_repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageCounts, GitHubError>;
}
