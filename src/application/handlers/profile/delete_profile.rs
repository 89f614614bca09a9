//! DeleteProfileHandler - removes a profile and its skills.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, ProfileId};
use crate::ports::ProfileRepository;

#[derive(Debug, Clone)]
pub struct DeleteProfileCommand {
    pub profile_id: ProfileId,
    pub requested_by: AuthenticatedUser,
}

pub struct DeleteProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl DeleteProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, cmd: DeleteProfileCommand) -> Result<(), DomainError> {
        let not_found = || {
            DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("Profile not found: {}", cmd.profile_id),
            )
        };

        let profile = self
            .profiles
            .find_by_id(cmd.profile_id)
            .await?
            .ok_or_else(not_found)?;

        if !cmd.requested_by.can_manage(profile.user_id()) {
            if !profile.is_public() {
                return Err(not_found());
            }
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the profile owner can delete it",
            ));
        }

        self.profiles.delete(profile.id()).await?;
        tracing::info!(profile_id = %profile.id(), deleted_by = %cmd.requested_by.id, "Profile deleted");
        Ok(())
    }
}
