//! SkillRepository port for skill persistence operations

use async_trait::async_trait;

use crate::domain::{
    foundation::{DomainError, ProfileId, SkillId},
    skill::Skill,
};

/// Repository for skills edited one at a time. `(profile_id, name)` is
/// unique. Bulk writes driven by a profile go through `ProfileRepository`.
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Insert a skill. Fails with `Conflict` on a duplicate name.
    async fn create(&self, skill: &Skill) -> Result<(), DomainError>;

    /// Overwrite an existing skill. Fails with `Conflict` when renamed onto
    /// another skill's name.
    async fn update(&self, skill: &Skill) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: SkillId) -> Result<Option<Skill>, DomainError>;

    /// Skills of a profile ordered by `(order, name)`.
    async fn list_by_profile(&self, profile_id: ProfileId) -> Result<Vec<Skill>, DomainError>;

    async fn delete(&self, id: SkillId) -> Result<(), DomainError>;
}
