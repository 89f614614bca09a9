//! GitHub adapters.
//!
//! - `client` - reqwest implementation of `GitHubSource`
//! - `mock` - scripted `GitHubSource` for tests

mod client;
mod mock;

pub use client::{GitHubClient, GitHubClientConfig, DEFAULT_GITHUB_API_URL, MAX_PAGE_SIZE};
pub use mock::MockGitHubSource;
