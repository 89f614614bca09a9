//! Profile aggregate root.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProfileId, Timestamp, UserId, ValidationError};

use super::values::{
    validate_github_username, validate_length, validate_website, Theme, MAX_GITHUB_USERNAME_LEN,
    MAX_HEADLINE_LEN, MAX_LOCATION_LEN,
};
use super::SyncSnapshot;

/// Partial update of the editable profile fields.
///
/// `None` leaves a field untouched. For `github_username` and `avatar_url`
/// an empty string clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub github_username: Option<String>,
    pub bio: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: Option<Theme>,
    pub is_public: Option<bool>,
}

/// What an edit did beyond overwriting fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeOutcome {
    /// The GitHub account switched to a different one; the old snapshot was
    /// dropped and GitHub-derived skills must be removed by the caller.
    pub github_account_switched: bool,
}

/// Every persisted field, used to rebuild a profile from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileParts {
    pub id: ProfileId,
    pub user_id: UserId,
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
    pub last_sync: Option<SyncSnapshot>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user's developer CV. One per identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    parts: ProfileParts,
}

impl Profile {
    /// Creates an empty, public profile for a user.
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            parts: ProfileParts {
                id: ProfileId::new(),
                user_id,
                username: username.into(),
                github_username: None,
                bio: String::new(),
                headline: String::new(),
                location: String::new(),
                website: String::new(),
                avatar_url: None,
                theme: Theme::default(),
                is_public: true,
                views: 0,
                last_sync: None,
                created_at: now,
                updated_at: now,
            },
        }
    }

    /// Rebuilds a profile from persisted state.
    pub fn reconstitute(parts: ProfileParts) -> Self {
        Self { parts }
    }

    pub fn id(&self) -> ProfileId {
        self.parts.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.parts.user_id
    }

    pub fn username(&self) -> &str {
        &self.parts.username
    }

    pub fn github_username(&self) -> Option<&str> {
        self.parts.github_username.as_deref()
    }

    pub fn bio(&self) -> &str {
        &self.parts.bio
    }

    pub fn headline(&self) -> &str {
        &self.parts.headline
    }

    pub fn location(&self) -> &str {
        &self.parts.location
    }

    pub fn website(&self) -> &str {
        &self.parts.website
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.parts.avatar_url.as_deref()
    }

    pub fn theme(&self) -> Theme {
        self.parts.theme
    }

    pub fn is_public(&self) -> bool {
        self.parts.is_public
    }

    pub fn views(&self) -> u64 {
        self.parts.views
    }

    pub fn last_sync(&self) -> Option<&SyncSnapshot> {
        self.parts.last_sync.as_ref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.parts.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.parts.updated_at
    }

    pub fn parts(&self) -> &ProfileParts {
        &self.parts
    }

    /// Applies an edit. Validation happens before any field is touched, so a
    /// rejected edit leaves the profile as it was.
    pub fn apply_changes(&mut self, changes: ProfileChanges) -> Result<ChangeOutcome, ValidationError> {
        if let Some(github) = changes.github_username.as_deref().map(str::trim) {
            if !github.is_empty() {
                validate_length("github_username", github, MAX_GITHUB_USERNAME_LEN)?;
                validate_github_username(github)?;
            }
        }
        if let Some(headline) = &changes.headline {
            validate_length("headline", headline, MAX_HEADLINE_LEN)?;
        }
        if let Some(location) = &changes.location {
            validate_length("location", location, MAX_LOCATION_LEN)?;
        }
        if let Some(website) = changes.website.as_deref().map(str::trim) {
            validate_website(website)?;
        }

        let mut outcome = ChangeOutcome::default();

        if let Some(github) = changes.github_username.map(|g| g.trim().to_string()) {
            if github.is_empty() {
                self.parts.github_username = None;
                self.parts.last_sync = None;
            } else if self.parts.github_username.as_deref() != Some(github.as_str()) {
                self.parts.github_username = Some(github);
                self.parts.last_sync = None;
                outcome.github_account_switched = true;
            }
        }
        if let Some(bio) = changes.bio {
            self.parts.bio = bio;
        }
        if let Some(headline) = changes.headline {
            self.parts.headline = headline;
        }
        if let Some(location) = changes.location {
            self.parts.location = location;
        }
        if let Some(website) = changes.website {
            self.parts.website = website.trim().to_string();
        }
        if let Some(avatar) = changes.avatar_url {
            let avatar = avatar.trim().to_string();
            self.parts.avatar_url = if avatar.is_empty() { None } else { Some(avatar) };
        }
        if let Some(theme) = changes.theme {
            self.parts.theme = theme;
        }
        if let Some(is_public) = changes.is_public {
            self.parts.is_public = is_public;
        }

        self.parts.updated_at = Timestamp::now();
        Ok(outcome)
    }

    /// Replaces the cached GitHub snapshot wholesale.
    pub fn record_sync(&mut self, snapshot: SyncSnapshot) {
        self.parts.updated_at = snapshot.synced_at;
        self.parts.last_sync = Some(snapshot);
    }

    /// Counts one public page view.
    pub fn record_view(&mut self) {
        self.parts.views = self.parts.views.saturating_add(1);
    }
}
