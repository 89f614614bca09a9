//! GetOrCreateProfileHandler - returns the caller's profile, creating an
//! empty one on first access.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode};
use crate::domain::profile::Profile;
use crate::ports::{ProfileRepository, SkillRepository};

use super::ProfileView;

/// Finds the user's profile or stores a new empty one.
///
/// A concurrent first access may win the insert; its profile is returned.
pub(crate) async fn find_or_create_profile(
    profiles: &dyn ProfileRepository,
    user: &AuthenticatedUser,
) -> Result<Profile, DomainError> {
    if let Some(existing) = profiles.find_by_user(&user.id).await? {
        return Ok(existing);
    }

    let profile = Profile::new(user.id.clone(), user.username.clone());
    match profiles.create(&profile).await {
        Ok(()) => {
            tracing::info!(profile_id = %profile.id(), user_id = %user.id, "Profile created");
            Ok(profile)
        }
        Err(e) if e.code() == ErrorCode::Conflict => profiles
            .find_by_user(&user.id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::ProfileNotFound, "Profile not found")),
        Err(e) => Err(e),
    }
}

/// Query for the caller's own profile.
#[derive(Debug, Clone)]
pub struct GetOrCreateProfileQuery {
    pub user: AuthenticatedUser,
}

pub struct GetOrCreateProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
    skills: Arc<dyn SkillRepository>,
}

impl GetOrCreateProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, skills: Arc<dyn SkillRepository>) -> Self {
        Self { profiles, skills }
    }

    pub async fn handle(&self, query: GetOrCreateProfileQuery) -> Result<ProfileView, DomainError> {
        let profile = find_or_create_profile(self.profiles.as_ref(), &query.user).await?;
        ProfileView::load(profile, self.skills.as_ref()).await
    }
}
