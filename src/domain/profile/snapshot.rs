//! Cached copy of a profile's GitHub data.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::github::{LanguageCounts, RepoRecord, UserRecord};

/// Number of repositories kept in a snapshot.
pub const SNAPSHOT_REPO_LIMIT: usize = 6;

/// GitHub data captured by one successful sync.
///
/// Always replaced as a whole; never merged with a previous snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSnapshot {
    pub user: UserRecord,
    pub repos: Vec<RepoRecord>,
    pub languages: LanguageCounts,
    pub synced_at: Timestamp,
}

impl SyncSnapshot {
    /// Builds a snapshot, keeping only the first [`SNAPSHOT_REPO_LIMIT`] repos.
    pub fn capture(
        user: UserRecord,
        mut repos: Vec<RepoRecord>,
        languages: LanguageCounts,
        synced_at: Timestamp,
    ) -> Self {
        repos.truncate(SNAPSHOT_REPO_LIMIT);
        Self {
            user,
            repos,
            languages,
            synced_at,
        }
    }

    /// True when the snapshot is younger than `max_age` at `now`.
    ///
    /// A `synced_at` later than `now` counts as fresh.
    pub fn is_fresh(&self, now: &Timestamp, max_age: Duration) -> bool {
        now.duration_since(&self.synced_at) < max_age
    }
}
