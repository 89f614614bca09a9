//! Request and response bodies for skill endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProfileId, SkillId, Timestamp};
use crate::domain::skill::{Skill, SkillCategory};

#[derive(Debug, Clone, Serialize)]
pub struct SkillResponse {
    pub id: SkillId,
    pub profile_id: ProfileId,
    pub name: String,
    pub category: SkillCategory,
    pub category_display: &'static str,
    pub level: i32,
    pub order: i32,
    pub created_at: Timestamp,
}

impl From<&Skill> for SkillResponse {
    fn from(skill: &Skill) -> Self {
        Self {
            id: skill.id(),
            profile_id: skill.profile_id(),
            name: skill.name().to_string(),
            category: skill.category(),
            category_display: skill.category().label(),
            level: skill.level().value(),
            order: skill.order(),
            created_at: skill.created_at(),
        }
    }
}

/// `POST /skills/`. Level defaults to 3 and order to 0.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSkillRequest {
    pub name: String,
    pub category: SkillCategory,
    #[serde(default)]
    pub level: Option<i32>,
    #[serde(default)]
    pub order: Option<i32>,
}

/// `PUT` / `PATCH /skills/{id}/`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSkillRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<SkillCategory>,
    #[serde(default)]
    pub level: Option<i32>,
    #[serde(default)]
    pub order: Option<i32>,
}
