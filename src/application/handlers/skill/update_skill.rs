//! UpdateSkillHandler - edits one of the caller's skills.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, SkillId};
use crate::domain::skill::{Skill, SkillCategory, SkillLevel};
use crate::ports::{ProfileRepository, SkillRepository};

use super::find_owned_skill;

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone)]
pub struct UpdateSkillCommand {
    pub user: AuthenticatedUser,
    pub skill_id: SkillId,
    pub name: Option<String>,
    pub category: Option<SkillCategory>,
    pub level: Option<i32>,
    pub order: Option<i32>,
}

pub struct UpdateSkillHandler {
    profiles: Arc<dyn ProfileRepository>,
    skills: Arc<dyn SkillRepository>,
}

impl UpdateSkillHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, skills: Arc<dyn SkillRepository>) -> Self {
        Self { profiles, skills }
    }

    pub async fn handle(&self, cmd: UpdateSkillCommand) -> Result<Skill, DomainError> {
        let level = cmd.level.map(SkillLevel::new).transpose()?;
        let mut skill =
            find_owned_skill(self.profiles.as_ref(), self.skills.as_ref(), &cmd.user, cmd.skill_id).await?;

        if let Some(name) = &cmd.name {
            skill.rename(name)?;
        }
        if let Some(category) = cmd.category {
            skill.set_category(category);
        }
        if let Some(level) = level {
            skill.set_level(level);
        }
        if let Some(order) = cmd.order {
            skill.set_order(order);
        }

        self.skills.update(&skill).await?;
        Ok(skill)
    }
}
