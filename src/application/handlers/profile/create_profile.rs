//! CreateProfileHandler - explicit creation of the caller's profile.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode};
use crate::domain::profile::{Profile, ProfileChanges};
use crate::ports::{ProfileRepository, SkillRepository};

use super::ProfileView;

/// Command to create the caller's profile with optional initial fields.
#[derive(Debug, Clone)]
pub struct CreateProfileCommand {
    pub user: AuthenticatedUser,
    pub fields: ProfileChanges,
}

pub struct CreateProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
    skills: Arc<dyn SkillRepository>,
}

impl CreateProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, skills: Arc<dyn SkillRepository>) -> Self {
        Self { profiles, skills }
    }

    pub async fn handle(&self, cmd: CreateProfileCommand) -> Result<ProfileView, DomainError> {
        if self.profiles.find_by_user(&cmd.user.id).await?.is_some() {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "A profile already exists for this user",
            ));
        }

        let mut profile = Profile::new(cmd.user.id.clone(), cmd.user.username.clone());
        profile.apply_changes(cmd.fields)?;
        self.profiles.create(&profile).await?;

        tracing::info!(profile_id = %profile.id(), user_id = %cmd.user.id, "Profile created");
        ProfileView::load(profile, self.skills.as_ref()).await
    }
}
