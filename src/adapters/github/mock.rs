//! Mock GitHub source for testing.
//!
//! Serves canned users and repositories from memory and records every call,
//! so tests can assert that no request was issued.
//!
//! # Example
//!
//! ```ignore
//! let github = MockGitHubSource::new()
//!     .with_user(user_record("octocat"))
//!     .with_repos("octocat", vec![repo("hello", Some("Rust"))]);
//!
//! let repos = github.fetch_repositories("octocat", 10).await?;
//! assert_eq!(github.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::github::{LanguageCounts, RepoRecord, UserRecord};
use crate::ports::{GitHubError, GitHubSource};

#[derive(Debug, Default)]
struct State {
    users: HashMap<String, UserRecord>,
    repos: HashMap<String, Vec<RepoRecord>>,
    languages: HashMap<(String, String), LanguageCounts>,
    failure: Option<GitHubError>,
    calls: Vec<String>,
}

/// In-memory `GitHubSource`.
#[derive(Debug, Default)]
pub struct MockGitHubSource {
    state: Mutex<State>,
}

impl MockGitHubSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user; lookups are by `login`.
    pub fn with_user(self, user: UserRecord) -> Self {
        self.lock().users.insert(user.login.clone(), user);
        self
    }

    /// Registers the repositories of `login`, most recently updated first.
    pub fn with_repos(self, login: impl Into<String>, repos: Vec<RepoRecord>) -> Self {
        self.lock().repos.insert(login.into(), repos);
        self
    }

    /// Registers the language breakdown of one repository.
    pub fn with_languages(
        self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        languages: LanguageCounts,
    ) -> Self {
        self.lock().languages.insert((owner.into(), repo.into()), languages);
        self
    }

    /// Makes every call fail with `error`.
    pub fn with_error(self, error: GitHubError) -> Self {
        self.fail_with(Some(error));
        self
    }

    /// Changes the forced failure after construction; `None` clears it.
    pub fn fail_with(&self, error: Option<GitHubError>) {
        self.lock().failure = error;
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Calls made so far, e.g. `"user:octocat"`, `"repos:octocat:10"`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: String) -> Result<MutexGuard<'_, State>, GitHubError> {
        let mut state = self.lock();
        state.calls.push(call);
        match &state.failure {
            Some(error) => Err(error.clone()),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl GitHubSource for MockGitHubSource {
    async fn fetch_user(&self, username: &str) -> Result<UserRecord, GitHubError> {
        let state = self.record(format!("user:{}", username))?;
        state.users.get(username).cloned().ok_or_else(|| GitHubError::NotFound {
            resource: username.to_string(),
        })
    }

    async fn fetch_repositories(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<RepoRecord>, GitHubError> {
        let state = self.record(format!("repos:{}:{}", username, limit))?;
        match state.repos.get(username) {
            Some(repos) => Ok(repos.iter().take(limit).cloned().collect()),
            None if state.users.contains_key(username) => Ok(Vec::new()),
            None => Err(GitHubError::NotFound {
                resource: username.to_string(),
            }),
        }
    }

    async fn fetch_repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageCounts, GitHubError> {
        let state = self.record(format!("languages:{}/{}", owner, repo))?;
        Ok(state
            .languages
            .get(&(owner.to_string(), repo.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
