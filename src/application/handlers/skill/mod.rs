//! Skill handlers.
//!
//! Every operation is scoped to the caller's own profile; skills of other
//! profiles behave as if they did not exist.

mod create_skill;
mod delete_skill;
mod get_skill;
mod list_skills;
mod update_skill;

pub use create_skill::{CreateSkillCommand, CreateSkillHandler};
pub use delete_skill::{DeleteSkillCommand, DeleteSkillHandler};
pub use get_skill::{GetSkillHandler, GetSkillQuery};
pub use list_skills::{ListSkillsHandler, ListSkillsQuery};
pub use update_skill::{UpdateSkillCommand, UpdateSkillHandler};

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, SkillId};
use crate::domain::skill::Skill;
use crate::ports::{ProfileRepository, SkillRepository};

fn skill_not_found(id: SkillId) -> DomainError {
    DomainError::new(ErrorCode::SkillNotFound, format!("Skill not found: {}", id))
}

/// Loads a skill that belongs to the caller's profile.
async fn find_owned_skill(
    profiles: &dyn ProfileRepository,
    skills: &dyn SkillRepository,
    user: &AuthenticatedUser,
    id: SkillId,
) -> Result<Skill, DomainError> {
    let profile = profiles
        .find_by_user(&user.id)
        .await?
        .ok_or_else(|| skill_not_found(id))?;

    skills
        .find_by_id(id)
        .await?
        .filter(|skill| skill.profile_id() == profile.id())
        .ok_or_else(|| skill_not_found(id))
}
