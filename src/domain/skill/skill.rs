//! Skill entity and its value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ProfileId, SkillId, Timestamp, ValidationError};

/// Maximum length of a skill name.
pub const MAX_SKILL_NAME_LEN: usize = 100;

/// Grouping used on the CV page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Backend,
    Frontend,
    Mobile,
    Devops,
    Database,
    Tools,
    Other,
}

impl SkillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backend => "backend",
            Self::Frontend => "frontend",
            Self::Mobile => "mobile",
            Self::Devops => "devops",
            Self::Database => "database",
            Self::Tools => "tools",
            Self::Other => "other",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Backend => "Backend",
            Self::Frontend => "Frontend",
            Self::Mobile => "Mobile",
            Self::Devops => "DevOps",
            Self::Database => "Databases",
            Self::Tools => "Tools",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backend" => Ok(Self::Backend),
            "frontend" => Ok(Self::Frontend),
            "mobile" => Ok(Self::Mobile),
            "devops" => Ok(Self::Devops),
            "database" => Ok(Self::Database),
            "tools" => Ok(Self::Tools),
            "other" => Ok(Self::Other),
            other => Err(ValidationError::invalid_format(
                "category",
                format!("unknown category '{}'", other),
            )),
        }
    }
}

/// Proficiency on a 1–5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct SkillLevel(u8);

impl SkillLevel {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range("level", Self::MIN, Self::MAX, value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> i32 {
        i32::from(self.0)
    }
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<i32> for SkillLevel {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SkillLevel> for i32 {
    fn from(level: SkillLevel) -> Self {
        level.value()
    }
}

/// Values needed to create or overwrite a skill, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDraft {
    pub name: String,
    pub category: SkillCategory,
    pub level: SkillLevel,
    pub order: i32,
}

/// A skill shown on a profile. `(profile_id, name)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    id: SkillId,
    profile_id: ProfileId,
    name: String,
    category: SkillCategory,
    level: SkillLevel,
    order: i32,
    created_at: Timestamp,
}

impl Skill {
    /// Creates a new skill after validating its name.
    pub fn new(profile_id: ProfileId, draft: SkillDraft) -> Result<Self, ValidationError> {
        let name = validate_name(&draft.name)?;
        Ok(Self {
            id: SkillId::new(),
            profile_id,
            name,
            category: draft.category,
            level: draft.level,
            order: draft.order,
            created_at: Timestamp::now(),
        })
    }

    /// Rebuilds a skill from persisted state.
    pub fn reconstitute(
        id: SkillId,
        profile_id: ProfileId,
        name: String,
        category: SkillCategory,
        level: SkillLevel,
        order: i32,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            profile_id,
            name,
            category,
            level,
            order,
            created_at,
        }
    }

    pub fn id(&self) -> SkillId {
        self.id
    }

    pub fn profile_id(&self) -> ProfileId {
        self.profile_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> SkillCategory {
        self.category
    }

    pub fn level(&self) -> SkillLevel {
        self.level
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn rename(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = validate_name(name)?;
        Ok(())
    }

    pub fn set_category(&mut self, category: SkillCategory) {
        self.category = category;
    }

    pub fn set_level(&mut self, level: SkillLevel) {
        self.level = level;
    }

    pub fn set_order(&mut self, order: i32) {
        self.order = order;
    }

    /// Overwrites category, level and order from a draft with the same name.
    pub fn apply_draft(&mut self, draft: &SkillDraft) {
        self.category = draft.category;
        self.level = draft.level;
        self.order = draft.order;
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    if trimmed.chars().count() > MAX_SKILL_NAME_LEN {
        return Err(ValidationError::too_long("name", MAX_SKILL_NAME_LEN));
    }
    Ok(trimmed.to_string())
}
