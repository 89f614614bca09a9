//! DeleteSkillHandler - removes one of the caller's skills.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, SkillId};
use crate::ports::{ProfileRepository, SkillRepository};

use super::find_owned_skill;

#[derive(Debug, Clone)]
pub struct DeleteSkillCommand {
    pub user: AuthenticatedUser,
    pub skill_id: SkillId,
}

pub struct DeleteSkillHandler {
    profiles: Arc<dyn ProfileRepository>,
    skills: Arc<dyn SkillRepository>,
}

impl DeleteSkillHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, skills: Arc<dyn SkillRepository>) -> Self {
        Self { profiles, skills }
    }

    pub async fn handle(&self, cmd: DeleteSkillCommand) -> Result<(), DomainError> {
        let skill =
            find_owned_skill(self.profiles.as_ref(), self.skills.as_ref(), &cmd.user, cmd.skill_id).await?;
        self.skills.delete(skill.id()).await
    }
}
