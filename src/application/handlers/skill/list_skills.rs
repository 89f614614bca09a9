//! ListSkillsHandler - the caller's skills ordered by `(order, name)`.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::domain::skill::Skill;
use crate::ports::{ProfileRepository, SkillRepository};

#[derive(Debug, Clone)]
pub struct ListSkillsQuery {
    pub user: AuthenticatedUser,
}

pub struct ListSkillsHandler {
    profiles: Arc<dyn ProfileRepository>,
    skills: Arc<dyn SkillRepository>,
}

impl ListSkillsHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, skills: Arc<dyn SkillRepository>) -> Self {
        Self { profiles, skills }
    }

    /// Users without a profile simply have no skills.
    pub async fn handle(&self, query: ListSkillsQuery) -> Result<Vec<Skill>, DomainError> {
        match self.profiles.find_by_user(&query.user.id).await? {
            Some(profile) => self.skills.list_by_profile(profile.id()).await,
            None => Ok(Vec::new()),
        }
    }
}
