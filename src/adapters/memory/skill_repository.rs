use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, SkillId};
use crate::domain::skill::Skill;
use crate::ports::SkillRepository;

use super::Tables;

/// In-memory `SkillRepository`.
#[derive(Debug, Clone)]
pub struct InMemorySkillRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemorySkillRepository {
    pub(super) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

fn duplicate(name: &str) -> DomainError {
    DomainError::new(
        ErrorCode::Conflict,
        format!("A skill named '{}' already exists on this profile", name),
    )
    .with_detail("field", "name")
}

fn name_taken(tables: &Tables, skill: &Skill) -> bool {
    tables.skills.values().any(|s| {
        s.id() != skill.id() && s.profile_id() == skill.profile_id() && s.name() == skill.name()
    })
}

#[async_trait]
impl SkillRepository for InMemorySkillRepository {
    async fn create(&self, skill: &Skill) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.profiles.contains_key(&skill.profile_id()) {
            return Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("Profile not found: {}", skill.profile_id()),
            ));
        }
        if name_taken(&tables, skill) {
            return Err(duplicate(skill.name()));
        }
        tables.skills.insert(skill.id(), skill.clone());
        Ok(())
    }

    async fn update(&self, skill: &Skill) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.skills.contains_key(&skill.id()) {
            return Err(DomainError::new(
                ErrorCode::SkillNotFound,
                format!("Skill not found: {}", skill.id()),
            ));
        }
        if name_taken(&tables, skill) {
            return Err(duplicate(skill.name()));
        }
        tables.skills.insert(skill.id(), skill.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SkillId) -> Result<Option<Skill>, DomainError> {
        Ok(self.tables.read().await.skills.get(&id).cloned())
    }

    async fn list_by_profile(&self, profile_id: ProfileId) -> Result<Vec<Skill>, DomainError> {
        let tables = self.tables.read().await;
        let mut skills: Vec<Skill> = tables
            .skills
            .values()
            .filter(|s| s.profile_id() == profile_id)
            .cloned()
            .collect();
        skills.sort_by(|a, b| a.order().cmp(&b.order()).then_with(|| a.name().cmp(b.name())));
        Ok(skills)
    }

    async fn delete(&self, id: SkillId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        match tables.skills.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::SkillNotFound,
                format!("Skill not found: {}", id),
            )),
        }
    }
}
