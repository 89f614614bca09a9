//! CreateSkillHandler - adds a skill to the caller's profile.

use std::sync::Arc;

use crate::application::handlers::profile::find_or_create_profile;
use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::domain::skill::{Skill, SkillCategory, SkillDraft, SkillLevel};
use crate::ports::{ProfileRepository, SkillRepository};

#[derive(Debug, Clone)]
pub struct CreateSkillCommand {
    pub user: AuthenticatedUser,
    pub name: String,
    pub category: SkillCategory,
    /// 1–5; defaults to 3.
    pub level: Option<i32>,
    pub order: Option<i32>,
}

pub struct CreateSkillHandler {
    profiles: Arc<dyn ProfileRepository>,
    skills: Arc<dyn SkillRepository>,
}

impl CreateSkillHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, skills: Arc<dyn SkillRepository>) -> Self {
        Self { profiles, skills }
    }

    pub async fn handle(&self, cmd: CreateSkillCommand) -> Result<Skill, DomainError> {
        let level = cmd.level.map(SkillLevel::new).transpose()?.unwrap_or_default();
        let draft = SkillDraft {
            name: cmd.name,
            category: cmd.category,
            level,
            order: cmd.order.unwrap_or(0),
        };

        let profile = find_or_create_profile(self.profiles.as_ref(), &cmd.user).await?;
        let skill = Skill::new(profile.id(), draft)?;
        self.skills.create(&skill).await?;
        Ok(skill)
    }
}
