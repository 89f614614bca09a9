//! GitHub API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::github::{GitHubClientConfig, DEFAULT_GITHUB_API_URL, MAX_PAGE_SIZE};
use crate::application::SyncPolicy;

#[derive(Clone, Deserialize)]
pub struct GitHubConfig {
    /// REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Personal access token; unauthenticated requests get a lower quota.
    #[serde(default)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Repositories fetched per sync
    #[serde(default = "default_repo_limit")]
    pub repo_limit: usize,

    /// Snapshot age in seconds before a non-forced sync fetches again
    #[serde(default = "default_stale_after")]
    pub stale_after_secs: u64,
}

impl GitHubConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn client_config(&self) -> GitHubClientConfig {
        let config = GitHubClientConfig::new()
            .with_base_url(self.api_url.clone())
            .with_timeout(self.timeout());
        match &self.token {
            Some(token) => config.with_token(token.clone()),
            None => config,
        }
    }

    pub fn sync_policy(&self) -> SyncPolicy {
        SyncPolicy {
            repo_limit: self.repo_limit,
            stale_after: chrono::Duration::seconds(i64::try_from(self.stale_after_secs).unwrap_or(i64::MAX)),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = reqwest::Url::parse(&self.api_url).map_err(|_| ValidationError::InvalidGitHubUrl)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ValidationError::InvalidGitHubUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidGitHubTimeout);
        }
        if self.repo_limit == 0 || self.repo_limit > MAX_PAGE_SIZE {
            return Err(ValidationError::InvalidRepoLimit);
        }
        Ok(())
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            timeout_secs: default_timeout(),
            repo_limit: default_repo_limit(),
            stale_after_secs: default_stale_after(),
        }
    }
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("repo_limit", &self.repo_limit)
            .field("stale_after_secs", &self.stale_after_secs)
            .finish()
    }
}

fn default_api_url() -> String {
    DEFAULT_GITHUB_API_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_repo_limit() -> usize {
    10
}

fn default_stale_after() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_config_defaults() {
        let config = GitHubConfig::default();
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());

        let policy = config.sync_policy();
        assert_eq!(policy.repo_limit, 10);
        assert_eq!(policy.stale_after, chrono::Duration::hours(1));
    }

    #[test]
    fn test_client_config_carries_token() {
        let anonymous = GitHubConfig::default().client_config();
        assert!(!anonymous.has_token());

        let config = GitHubConfig {
            token: Some("ghp_example".to_string()),
            ..Default::default()
        };
        assert!(config.client_config().has_token());
        assert!(!format!("{:?}", config).contains("ghp_example"));
    }

    #[test]
    fn test_validation_bounds() {
        let bad_url = GitHubConfig {
            api_url: "api.github.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(bad_url.validate(), Err(ValidationError::InvalidGitHubUrl)));

        let no_timeout = GitHubConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(no_timeout.validate(), Err(ValidationError::InvalidGitHubTimeout)));

        let too_many = GitHubConfig {
            repo_limit: 101,
            ..Default::default()
        };
        assert!(matches!(too_many.validate(), Err(ValidationError::InvalidRepoLimit)));
    }
}
