//! Request and response bodies for profile endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::skill::SkillResponse;
use crate::application::{LanguageStat, ProfileView};
use crate::domain::foundation::{ProfileId, Timestamp};
use crate::domain::github::{RepoRecord, UserRecord};
use crate::domain::profile::{ProfileChanges, Theme};

/// Full profile as shown on the CV page.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: ProfileId,
    pub username: String,
    pub github_username: Option<String>,
    pub bio: String,
    pub headline: String,
    pub location: String,
    pub website: String,
    pub avatar_url: Option<String>,
    pub theme: Theme,
    pub is_public: bool,
    pub views: u64,
    pub skills: Vec<SkillResponse>,
    pub skills_count: usize,
    /// GitHub account as of the last sync.
    pub github_data: Option<UserRecord>,
    pub github_repos: Vec<RepoRecord>,
    pub github_languages: Vec<LanguageStat>,
    pub last_synced_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&ProfileView> for ProfileResponse {
    fn from(view: &ProfileView) -> Self {
        let profile = &view.profile;
        Self {
            id: profile.id(),
            username: profile.username().to_string(),
            github_username: profile.github_username().map(str::to_string),
            bio: profile.bio().to_string(),
            headline: profile.headline().to_string(),
            location: profile.location().to_string(),
            website: profile.website().to_string(),
            avatar_url: profile.avatar_url().map(str::to_string),
            theme: profile.theme(),
            is_public: profile.is_public(),
            views: profile.views(),
            skills: view.skills.iter().map(SkillResponse::from).collect(),
            skills_count: view.skills_count(),
            github_data: profile.last_sync().map(|snapshot| snapshot.user.clone()),
            github_repos: view.github_repos().to_vec(),
            github_languages: view.github_languages(),
            last_synced_at: view.last_synced_at(),
            created_at: profile.created_at(),
            updated_at: profile.updated_at(),
        }
    }
}

/// Body of `POST /profiles/`, `PUT` and `PATCH /profiles/{id}/`.
///
/// Absent fields are left unchanged; an empty `github_username` or
/// `avatar_url` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileFieldsRequest {
    #[serde(default)]
    pub github_username: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

impl From<ProfileFieldsRequest> for ProfileChanges {
    fn from(req: ProfileFieldsRequest) -> Self {
        ProfileChanges {
            github_username: req.github_username,
            bio: req.bio,
            headline: req.headline,
            location: req.location,
            website: req.website,
            avatar_url: req.avatar_url,
            theme: req.theme,
            is_public: req.is_public,
        }
    }
}

/// Body of `POST /profiles/{id}/sync_github/`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SyncRequest {
    #[serde(default)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::profile::Profile;

    #[test]
    fn fresh_profile_serializes_without_github_data() {
        let view = ProfileView {
            profile: Profile::new(UserId::new("user-1").unwrap(), "octocat"),
            skills: Vec::new(),
        };
        let json = serde_json::to_value(ProfileResponse::from(&view)).unwrap();

        assert_eq!(json["username"], "octocat");
        assert_eq!(json["skills_count"], 0);
        assert!(json["github_data"].is_null());
        assert!(json["last_synced_at"].is_null());
        assert_eq!(json["github_repos"], serde_json::json!([]));
        assert_eq!(json["github_languages"], serde_json::json!([]));
    }

    #[test]
    fn fields_request_maps_onto_changes() {
        let req: ProfileFieldsRequest = serde_json::from_value(serde_json::json!({
            "headline": "Rust developer",
            "theme": "dracula",
            "is_public": false
        }))
        .unwrap();
        let changes = ProfileChanges::from(req);

        assert_eq!(changes.headline.as_deref(), Some("Rust developer"));
        assert_eq!(changes.theme, Some(Theme::Dracula));
        assert_eq!(changes.is_public, Some(false));
        assert!(changes.github_username.is_none());
    }

    #[test]
    fn sync_request_defaults_to_not_forced() {
        let req: SyncRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.force);
    }
}
