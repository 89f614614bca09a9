//! SyncGitHubHandler - Command handler that refreshes a profile from GitHub.
//!
//! Fetches the account and its most recently updated repositories, then
//! stores a new snapshot together with one upserted skill per language found.
//! Every fetch completes before the write, and the write is all-or-nothing,
//! so a failed sync leaves the stored snapshot and skills as they were.

use chrono::Duration;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::{
    AuthenticatedUser, DomainError, ErrorCode, ProfileId, Timestamp, ValidationError,
};
use crate::domain::github::{aggregate_languages, RepoRecord, UserRecord};
use crate::domain::profile::SyncSnapshot;
use crate::domain::skill::{draft_for_language, SkillDraft};
use crate::ports::{GitHubError, GitHubSource, ProfileRepository};

/// How much to fetch and how long a snapshot stays fresh.
#[derive(Debug, Clone, Copy)]
pub struct SyncPolicy {
    /// Repositories requested per sync.
    pub repo_limit: usize,
    /// Age after which a snapshot is refreshed without `force`.
    pub stale_after: Duration,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            repo_limit: 10,
            stale_after: Duration::hours(1),
        }
    }
}

/// Command to synchronize a profile with its GitHub account.
#[derive(Debug, Clone)]
pub struct SyncGitHubCommand {
    pub profile_id: ProfileId,
    pub requested_by: AuthenticatedUser,
    /// Ignore the staleness window.
    pub force: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Success,
    Skipped,
}

/// Outcome of a sync request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncResult {
    pub status: SyncStatus,
    pub repos_synced: usize,
    pub languages_found: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SyncResult {
    fn skipped() -> Self {
        Self {
            status: SyncStatus::Skipped,
            repos_synced: 0,
            languages_found: 0,
            reason: Some("Synchronized less than an hour ago".to_string()),
        }
    }
}

/// Why a sync did not run or did not finish.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Only the profile owner can synchronize it")]
    Forbidden,

    #[error("Profile not found: {0}")]
    ProfileNotFound(ProfileId),

    #[error(transparent)]
    Upstream(#[from] GitHubError),

    #[error(transparent)]
    Persistence(DomainError),
}

impl From<SyncError> for DomainError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Validation(e) => e.into(),
            SyncError::Forbidden => DomainError::new(
                ErrorCode::Forbidden,
                "Only the profile owner can synchronize it",
            ),
            SyncError::ProfileNotFound(id) => {
                DomainError::new(ErrorCode::ProfileNotFound, format!("Profile not found: {}", id))
            }
            SyncError::Upstream(e) => e.into(),
            SyncError::Persistence(e) => e,
        }
    }
}

/// Handler for GitHub synchronization.
pub struct SyncGitHubHandler {
    profiles: Arc<dyn ProfileRepository>,
    github: Arc<dyn GitHubSource>,
    policy: SyncPolicy,
}

impl SyncGitHubHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        github: Arc<dyn GitHubSource>,
        policy: SyncPolicy,
    ) -> Self {
        Self {
            profiles,
            github,
            policy,
        }
    }

    pub async fn handle(&self, cmd: SyncGitHubCommand) -> Result<SyncResult, SyncError> {
        // 1. Load and authorize
        let profile = self
            .profiles
            .find_by_id(cmd.profile_id)
            .await
            .map_err(SyncError::Persistence)?
            .ok_or(SyncError::ProfileNotFound(cmd.profile_id))?;

        if !cmd.requested_by.can_manage(profile.user_id()) {
            return Err(SyncError::Forbidden);
        }

        let login = profile
            .github_username()
            .map(str::trim)
            .filter(|login| !login.is_empty())
            .ok_or_else(|| ValidationError::empty_field("github_username"))?
            .to_string();

        // 2. Staleness guard
        let now = Timestamp::now();
        if !cmd.force {
            if let Some(snapshot) = profile.last_sync() {
                if snapshot.is_fresh(&now, self.policy.stale_after) {
                    tracing::debug!(profile_id = %profile.id(), github = %login, "GitHub snapshot is fresh, skipping sync");
                    return Ok(SyncResult::skipped());
                }
            }
        }

        // 3. Fetch everything before writing anything
        let (user, repos) = match self.fetch(&login).await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!(profile_id = %profile.id(), github = %login, error = %e, "GitHub sync failed");
                return Err(e.into());
            }
        };

        let languages = aggregate_languages(&repos);
        let repos_synced = repos.len();
        let languages_found = languages.len();

        // 4. Persist snapshot and derived skills together
        let snapshot = SyncSnapshot::capture(user, repos, languages, now);
        let drafts: Vec<SkillDraft> = snapshot
            .languages
            .iter()
            .map(|(language, count)| draft_for_language(language, count))
            .collect();

        if let Err(e) = self.profiles.apply_sync(profile.id(), &snapshot, &drafts).await {
            tracing::error!(profile_id = %profile.id(), github = %login, error = %e, "Failed to store GitHub sync");
            return Err(SyncError::Persistence(e));
        }

        tracing::info!(
            profile_id = %profile.id(),
            github = %login,
            repos_synced,
            languages_found,
            "GitHub sync completed"
        );

        Ok(SyncResult {
            status: SyncStatus::Success,
            repos_synced,
            languages_found,
            reason: None,
        })
    }

    async fn fetch(
        &self,
        login: &str,
    ) -> Result<(UserRecord, Vec<RepoRecord>), GitHubError> {
        let user = self.github.fetch_user(login).await?;
        let repos = self.github.fetch_repositories(login, self.policy.repo_limit).await?;
        Ok((user, repos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::github::MockGitHubSource;
    use crate::adapters::memory::{InMemoryProfileRepository, InMemoryStore};
    use crate::domain::foundation::UserId;
    use crate::domain::github::LanguageCounts;
    use crate::domain::profile::{Profile, ProfileChanges};
    use crate::domain::skill::{Skill, SkillCategory, SkillLevel, MAX_SKILL_NAME_LEN};
    use crate::ports::SkillRepository;
    use async_trait::async_trait;
    use std::time::Duration as StdDuration;

    // ════════════════════════════════════════════════════════════════════════════
    // Fixtures
    // ════════════════════════════════════════════════════════════════════════════

    fn user_record(login: &str) -> UserRecord {
        serde_json::from_value(serde_json::json!({
            "login": login,
            "id": 583231,
            "html_url": format!("https://github.com/{}", login),
            "name": "The Octocat",
            "public_repos": 8,
        }))
        .unwrap()
    }

    fn repo(id: u64, name: &str, language: Option<&str>) -> RepoRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "html_url": format!("https://github.com/octocat/{}", name),
            "stargazers_count": 3,
            "forks_count": 1,
            "updated_at": "2026-01-15T10:00:00Z",
            "language": language,
        }))
        .unwrap()
    }

    fn repos() -> Vec<RepoRecord> {
        vec![
            repo(1, "api", Some("Rust")),
            repo(2, "web", Some("TypeScript")),
            repo(3, "cli", Some("Rust")),
            repo(4, "dotfiles", None),
            repo(5, "app", Some("Kotlin")),
            repo(6, "infra", Some("HCL")),
            repo(7, "bench", Some("Rust")),
        ]
    }

    fn owner() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("alice").unwrap(), "alice", None, false)
    }

    fn stranger() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("mallory").unwrap(), "mallory", None, false)
    }

    fn staff() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("admin").unwrap(), "admin", None, true)
    }

    struct Fixture {
        store: InMemoryStore,
        github: Arc<MockGitHubSource>,
        handler: SyncGitHubHandler,
        profile_id: ProfileId,
    }

    async fn fixture_with(github: MockGitHubSource, github_username: Option<&str>) -> Fixture {
        let store = InMemoryStore::new();
        let mut profile = Profile::new(owner().id, "alice");
        if let Some(login) = github_username {
            profile
                .apply_changes(ProfileChanges {
                    github_username: Some(login.to_string()),
                    ..Default::default()
                })
                .unwrap();
        }
        store.profiles().create(&profile).await.unwrap();

        let github = Arc::new(github);
        let handler = SyncGitHubHandler::new(Arc::new(store.profiles()), github.clone(), SyncPolicy::default());

        Fixture {
            store,
            github,
            handler,
            profile_id: profile.id(),
        }
    }

    async fn fixture() -> Fixture {
        let github = MockGitHubSource::new()
            .with_user(user_record("octocat"))
            .with_repos("octocat", repos());
        fixture_with(github, Some("octocat")).await
    }

    fn command(profile_id: ProfileId, requested_by: AuthenticatedUser, force: bool) -> SyncGitHubCommand {
        SyncGitHubCommand {
            profile_id,
            requested_by,
            force,
        }
    }

    async fn snapshot_aged(f: &Fixture, age_secs: i64) {
        let snapshot = SyncSnapshot::capture(
            user_record("octocat"),
            vec![repo(99, "old", Some("Go"))],
            LanguageCounts::from_iter([("Go".to_string(), 1)]),
            Timestamp::now().minus_secs(age_secs),
        );
        f.store.profiles().apply_sync(f.profile_id, &snapshot, &[]).await.unwrap();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success path
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn first_sync_stores_snapshot_and_skills() {
        let f = fixture().await;

        let result = f.handler.handle(command(f.profile_id, owner(), false)).await.unwrap();

        assert_eq!(result.status, SyncStatus::Success);
        assert_eq!(result.repos_synced, 7);
        assert_eq!(result.languages_found, 4);

        let profile = f.store.profiles().find_by_id(f.profile_id).await.unwrap().unwrap();
        let snapshot = profile.last_sync().unwrap();
        assert_eq!(snapshot.repos.len(), 6);
        assert_eq!(snapshot.user.login, "octocat");
        assert_eq!(snapshot.languages.get("Rust"), Some(3));

        let skills = f.store.skills().list_by_profile(f.profile_id).await.unwrap();
        let rust = skills.iter().find(|s| s.name() == "Rust").unwrap();
        assert_eq!(rust.category(), SkillCategory::Backend);
        assert_eq!(rust.level().value(), 4);
        assert_eq!(rust.order(), 97);
        assert_eq!(skills.iter().find(|s| s.name() == "HCL").unwrap().category(), SkillCategory::Tools);
        // Ordered by display order: Rust (97) first.
        assert_eq!(skills[0].name(), "Rust");
    }

    #[tokio::test]
    async fn requests_configured_repo_limit() {
        let f = fixture().await;
        f.handler.handle(command(f.profile_id, owner(), false)).await.unwrap();

        assert_eq!(
            f.github.calls(),
            vec!["user:octocat".to_string(), "repos:octocat:10".to_string()]
        );
    }

    #[tokio::test]
    async fn staff_may_sync_any_profile() {
        let f = fixture().await;
        let result = f.handler.handle(command(f.profile_id, staff(), false)).await.unwrap();
        assert_eq!(result.status, SyncStatus::Success);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Staleness guard
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn fresh_snapshot_is_skipped_without_network_call() {
        let f = fixture().await;
        snapshot_aged(&f, 10 * 60).await;

        let result = f.handler.handle(command(f.profile_id, owner(), false)).await.unwrap();

        assert_eq!(result.status, SyncStatus::Skipped);
        assert_eq!(result.repos_synced, 0);
        assert_eq!(result.languages_found, 0);
        assert_eq!(f.github.call_count(), 0);
    }

    #[tokio::test]
    async fn future_snapshot_counts_as_fresh() {
        let f = fixture().await;
        snapshot_aged(&f, -600).await;

        let result = f.handler.handle(command(f.profile_id, owner(), false)).await.unwrap();
        assert_eq!(result.status, SyncStatus::Skipped);
    }

    #[tokio::test]
    async fn stale_snapshot_is_refreshed() {
        let f = fixture().await;
        snapshot_aged(&f, 2 * 3600).await;

        let result = f.handler.handle(command(f.profile_id, owner(), false)).await.unwrap();
        assert_eq!(result.status, SyncStatus::Success);
        assert_eq!(f.github.call_count(), 2);
    }

    #[tokio::test]
    async fn force_fetches_regardless_of_age() {
        let f = fixture().await;
        snapshot_aged(&f, 10).await;

        let result = f.handler.handle(command(f.profile_id, owner(), true)).await.unwrap();

        assert_eq!(result.status, SyncStatus::Success);
        assert_eq!(f.github.call_count(), 2);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failures
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn upstream_failure_leaves_snapshot_and_skills_unchanged() {
        let f = fixture().await;
        snapshot_aged(&f, 2 * 3600).await;
        let manual = Skill::new(
            f.profile_id,
            SkillDraft {
                name: "Leadership".to_string(),
                category: SkillCategory::Other,
                level: SkillLevel::default(),
                order: 0,
            },
        )
        .unwrap();
        f.store.skills().create(&manual).await.unwrap();
        let before = f.store.profiles().find_by_id(f.profile_id).await.unwrap().unwrap();

        f.github.fail_with(Some(GitHubError::RateLimited {
            retry_after: StdDuration::from_secs(120),
        }));
        let err = f.handler.handle(command(f.profile_id, owner(), true)).await.unwrap_err();

        assert!(matches!(err, SyncError::Upstream(GitHubError::RateLimited { .. })));
        let after = f.store.profiles().find_by_id(f.profile_id).await.unwrap().unwrap();
        assert_eq!(before.last_sync(), after.last_sync());
        let skills = f.store.skills().list_by_profile(f.profile_id).await.unwrap();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].name(), "Leadership");
    }

    #[tokio::test]
    async fn unknown_github_user_maps_to_user_not_found() {
        let f = fixture_with(MockGitHubSource::new(), Some("ghost")).await;

        let err = f.handler.handle(command(f.profile_id, owner(), false)).await.unwrap_err();
        let domain: DomainError = err.into();

        assert_eq!(domain.code(), ErrorCode::GitHubUserNotFound);
        assert!(domain.message().contains("ghost"));
    }

    #[tokio::test]
    async fn missing_github_username_is_validation_error() {
        let f = fixture_with(MockGitHubSource::new(), None).await;

        let err = f.handler.handle(command(f.profile_id, owner(), true)).await.unwrap_err();

        assert!(matches!(err, SyncError::Validation(_)));
        assert_eq!(f.github.call_count(), 0);
        let domain: DomainError = err.into();
        assert_eq!(domain.details.get("field"), Some(&"github_username".to_string()));
    }

    #[tokio::test]
    async fn other_users_are_forbidden() {
        let f = fixture().await;
        let err = f.handler.handle(command(f.profile_id, stranger(), true)).await.unwrap_err();
        assert!(matches!(err, SyncError::Forbidden));
        assert_eq!(f.github.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_profile_is_not_found() {
        let f = fixture().await;
        let err = f.handler.handle(command(ProfileId::new(), owner(), true)).await.unwrap_err();
        assert!(matches!(err, SyncError::ProfileNotFound(_)));
    }

    /// Profile store whose sync writes always fail.
    struct BrokenSyncWrites(InMemoryProfileRepository);

    #[async_trait]
    impl ProfileRepository for BrokenSyncWrites {
        async fn create(&self, profile: &Profile) -> Result<(), DomainError> {
            self.0.create(profile).await
        }
        async fn update(&self, profile: &Profile) -> Result<(), DomainError> {
            self.0.update(profile).await
        }
        async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>, DomainError> {
            self.0.find_by_id(id).await
        }
        async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
            self.0.find_by_user(user_id).await
        }
        async fn find_public_by_username(&self, username: &str) -> Result<Option<Profile>, DomainError> {
            self.0.find_public_by_username(username).await
        }
        async fn list_all(&self) -> Result<Vec<Profile>, DomainError> {
            self.0.list_all().await
        }
        async fn list_visible_to(&self, viewer: Option<&UserId>) -> Result<Vec<Profile>, DomainError> {
            self.0.list_visible_to(viewer).await
        }
        async fn apply_sync(
            &self,
            _id: ProfileId,
            _snapshot: &SyncSnapshot,
            _skills: &[SkillDraft],
        ) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "connection reset"))
        }
        async fn update_dropping_skills(
            &self,
            profile: &Profile,
            categories: &[SkillCategory],
        ) -> Result<u64, DomainError> {
            self.0.update_dropping_skills(profile, categories).await
        }
        async fn increment_views(&self, id: ProfileId) -> Result<u64, DomainError> {
            self.0.increment_views(id).await
        }
        async fn delete(&self, id: ProfileId) -> Result<(), DomainError> {
            self.0.delete(id).await
        }
    }

    #[tokio::test]
    async fn storage_failure_is_reported_and_nothing_is_stored() {
        let f = fixture().await;
        snapshot_aged(&f, 2 * 3600).await;
        let before = f.store.profiles().find_by_id(f.profile_id).await.unwrap().unwrap();
        let handler = SyncGitHubHandler::new(
            Arc::new(BrokenSyncWrites(f.store.profiles())),
            f.github.clone(),
            SyncPolicy::default(),
        );

        let err = handler.handle(command(f.profile_id, owner(), true)).await.unwrap_err();

        assert!(matches!(&err, SyncError::Persistence(e) if e.code() == ErrorCode::DatabaseError));
        let after = f.store.profiles().find_by_id(f.profile_id).await.unwrap().unwrap();
        assert_eq!(before.last_sync(), after.last_sync());
        assert_eq!(f.store.skill_count().await, 0);
    }

    #[tokio::test]
    async fn unstorable_language_rolls_back_the_whole_sync() {
        let odd_language = "x".repeat(MAX_SKILL_NAME_LEN + 1);
        let github = MockGitHubSource::new()
            .with_user(user_record("octocat"))
            .with_repos(
                "octocat",
                vec![
                    repo(1, "api", Some("Rust")),
                    repo(2, "odd", Some(odd_language.as_str())),
                    repo(3, "ml", Some("Python")),
                ],
            );
        let f = fixture_with(github, Some("octocat")).await;
        snapshot_aged(&f, 2 * 3600).await;
        let before = f.store.profiles().find_by_id(f.profile_id).await.unwrap().unwrap();

        let err = f.handler.handle(command(f.profile_id, owner(), true)).await.unwrap_err();

        assert!(matches!(err, SyncError::Persistence(_)));
        let after = f.store.profiles().find_by_id(f.profile_id).await.unwrap().unwrap();
        assert_eq!(before.last_sync(), after.last_sync());
        assert_eq!(after.last_sync().unwrap().repos[0].name, "old");
        assert_eq!(f.store.skill_count().await, 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Idempotency
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn repeated_sync_keeps_one_skill_per_language() {
        let f = fixture().await;

        f.handler.handle(command(f.profile_id, owner(), true)).await.unwrap();
        let first = f.store.skills().list_by_profile(f.profile_id).await.unwrap();
        f.handler.handle(command(f.profile_id, owner(), true)).await.unwrap();
        let second = f.store.skills().list_by_profile(f.profile_id).await.unwrap();

        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
        assert_eq!(f.store.skill_count().await, 4);
    }
}
