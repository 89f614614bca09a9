//! GetSkillHandler - one of the caller's skills.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, SkillId};
use crate::domain::skill::Skill;
use crate::ports::{ProfileRepository, SkillRepository};

use super::find_owned_skill;

#[derive(Debug, Clone)]
pub struct GetSkillQuery {
    pub user: AuthenticatedUser,
    pub skill_id: SkillId,
}

pub struct GetSkillHandler {
    profiles: Arc<dyn ProfileRepository>,
    skills: Arc<dyn SkillRepository>,
}

impl GetSkillHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, skills: Arc<dyn SkillRepository>) -> Self {
        Self { profiles, skills }
    }

    pub async fn handle(&self, query: GetSkillQuery) -> Result<Skill, DomainError> {
        find_owned_skill(self.profiles.as_ref(), self.skills.as_ref(), &query.user, query.skill_id).await
    }
}
