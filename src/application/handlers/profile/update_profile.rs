//! UpdateProfileHandler - partial update of a profile.
//!
//! Switching to a different GitHub account drops the snapshot and removes
//! the backend and frontend skills derived from the previous account.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, ProfileId};
use crate::domain::profile::ProfileChanges;
use crate::domain::skill::SkillCategory;
use crate::ports::{ProfileRepository, SkillRepository};

use super::ProfileView;

/// Categories derived from a GitHub account.
const GITHUB_DERIVED: [SkillCategory; 2] = [SkillCategory::Backend, SkillCategory::Frontend];

/// Command to edit a profile. PUT supplies every field, PATCH a subset.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub profile_id: ProfileId,
    pub requested_by: AuthenticatedUser,
    pub changes: ProfileChanges,
}

pub struct UpdateProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
    skills: Arc<dyn SkillRepository>,
}

impl UpdateProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, skills: Arc<dyn SkillRepository>) -> Self {
        Self { profiles, skills }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<ProfileView, DomainError> {
        let not_found = || {
            DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("Profile not found: {}", cmd.profile_id),
            )
        };

        let mut profile = self
            .profiles
            .find_by_id(cmd.profile_id)
            .await?
            .ok_or_else(not_found)?;

        if !cmd.requested_by.can_manage(profile.user_id()) {
            // Private profiles of other users do not exist for the caller.
            if !profile.is_public() {
                return Err(not_found());
            }
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the profile owner can edit it",
            ));
        }

        let outcome = profile.apply_changes(cmd.changes)?;

        if outcome.github_account_switched {
            let removed = self
                .profiles
                .update_dropping_skills(&profile, &GITHUB_DERIVED)
                .await?;
            tracing::info!(
                profile_id = %profile.id(),
                github = profile.github_username().unwrap_or_default(),
                removed_skills = removed,
                "GitHub account changed, derived data cleared"
            );
        } else {
            self.profiles.update(&profile).await?;
        }

        ProfileView::load(profile, self.skills.as_ref()).await
    }
}
