//! GetProfileHandler - one profile by id.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, ProfileId};
use crate::domain::profile::Profile;
use crate::ports::{ProfileRepository, SkillRepository};

use super::ProfileView;

/// Query for a profile. Anonymous viewers only see public profiles.
#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub profile_id: ProfileId,
    pub viewer: Option<AuthenticatedUser>,
}

/// Public, own, or any profile for staff.
fn is_visible_to(profile: &Profile, viewer: Option<&AuthenticatedUser>) -> bool {
    profile.is_public() || viewer.is_some_and(|v| v.can_manage(profile.user_id()))
}

pub struct GetProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
    skills: Arc<dyn SkillRepository>,
}

impl GetProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, skills: Arc<dyn SkillRepository>) -> Self {
        Self { profiles, skills }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<ProfileView, DomainError> {
        let profile = self
            .profiles
            .find_by_id(query.profile_id)
            .await?
            .filter(|p| is_visible_to(p, query.viewer.as_ref()))
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ProfileNotFound,
                    format!("Profile not found: {}", query.profile_id),
                )
            })?;

        ProfileView::load(profile, self.skills.as_ref()).await
    }
}
