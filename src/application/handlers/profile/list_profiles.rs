//! ListProfilesHandler - profiles visible to the caller, oldest first.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::ports::{ProfileRepository, SkillRepository};

use super::ProfileView;

#[derive(Debug, Clone, Default)]
pub struct ListProfilesQuery {
    pub viewer: Option<AuthenticatedUser>,
}

pub struct ListProfilesHandler {
    profiles: Arc<dyn ProfileRepository>,
    skills: Arc<dyn SkillRepository>,
}

impl ListProfilesHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, skills: Arc<dyn SkillRepository>) -> Self {
        Self { profiles, skills }
    }

    pub async fn handle(&self, query: ListProfilesQuery) -> Result<Vec<ProfileView>, DomainError> {
        let profiles = match &query.viewer {
            Some(viewer) if viewer.is_staff => self.profiles.list_all().await?,
            Some(viewer) => self.profiles.list_visible_to(Some(&viewer.id)).await?,
            None => self.profiles.list_visible_to(None).await?,
        };

        let mut views = Vec::with_capacity(profiles.len());
        for profile in profiles {
            views.push(ProfileView::load(profile, self.skills.as_ref()).await?);
        }
        Ok(views)
    }
}
