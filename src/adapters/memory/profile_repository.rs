use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, UserId};
use crate::domain::profile::{Profile, ProfileParts, SyncSnapshot};
use crate::domain::skill::{Skill, SkillCategory, SkillDraft};
use crate::ports::ProfileRepository;

use super::Tables;

/// In-memory `ProfileRepository`.
#[derive(Debug, Clone)]
pub struct InMemoryProfileRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryProfileRepository {
    pub(super) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

fn not_found(id: ProfileId) -> DomainError {
    DomainError::new(ErrorCode::ProfileNotFound, format!("Profile not found: {}", id))
}

/// Replaces the stored profile, keeping its view counter.
fn overwrite(tables: &mut Tables, profile: &Profile) -> Result<(), DomainError> {
    let stored = tables
        .profiles
        .get_mut(&profile.id())
        .ok_or_else(|| not_found(profile.id()))?;

    let parts = ProfileParts {
        views: stored.views(),
        ..profile.parts().clone()
    };
    *stored = Profile::reconstitute(parts);
    Ok(())
}

/// Skill rows that upserting `drafts` produces. Reads only, so a failure
/// here leaves the tables untouched.
fn stage_upserts(tables: &Tables, profile_id: ProfileId, drafts: &[SkillDraft]) -> Result<Vec<Skill>, DomainError> {
    let mut staged: Vec<Skill> = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let name = draft.name.trim();
        if let Some(pending) = staged.iter_mut().find(|s| s.name() == name) {
            pending.apply_draft(draft);
            continue;
        }
        let existing = tables
            .skills
            .values()
            .find(|s| s.profile_id() == profile_id && s.name() == name);
        let skill = match existing {
            Some(existing) => {
                let mut skill = existing.clone();
                skill.apply_draft(draft);
                skill
            }
            None => Skill::new(profile_id, draft.clone())?,
        };
        staged.push(skill);
    }
    Ok(staged)
}

fn oldest_first(mut profiles: Vec<Profile>) -> Vec<Profile> {
    profiles.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
    });
    profiles
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, profile: &Profile) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.profiles.values().any(|p| p.user_id() == profile.user_id()) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "A profile already exists for this user",
            ));
        }
        tables.profiles.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        overwrite(&mut tables, profile)
    }

    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>, DomainError> {
        Ok(self.tables.read().await.profiles.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.profiles.values().find(|p| p.user_id() == user_id).cloned())
    }

    async fn find_public_by_username(&self, username: &str) -> Result<Option<Profile>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .values()
            .find(|p| p.is_public() && p.username() == username)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Profile>, DomainError> {
        let tables = self.tables.read().await;
        Ok(oldest_first(tables.profiles.values().cloned().collect()))
    }

    async fn list_visible_to(&self, viewer: Option<&UserId>) -> Result<Vec<Profile>, DomainError> {
        let tables = self.tables.read().await;
        let visible = tables
            .profiles
            .values()
            .filter(|p| p.is_public() || Some(p.user_id()) == viewer)
            .cloned()
            .collect();
        Ok(oldest_first(visible))
    }

    async fn apply_sync(
        &self,
        id: ProfileId,
        snapshot: &SyncSnapshot,
        skills: &[SkillDraft],
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let staged = stage_upserts(&tables, id, skills)?;

        let stored = tables.profiles.get_mut(&id).ok_or_else(|| not_found(id))?;
        stored.record_sync(snapshot.clone());
        for skill in staged {
            tables.skills.insert(skill.id(), skill);
        }
        Ok(())
    }

    async fn update_dropping_skills(
        &self,
        profile: &Profile,
        categories: &[SkillCategory],
    ) -> Result<u64, DomainError> {
        let mut tables = self.tables.write().await;
        overwrite(&mut tables, profile)?;

        let before = tables.skills.len();
        tables.skills.retain(|_, s| {
            !(s.profile_id() == profile.id() && categories.contains(&s.category()))
        });
        Ok((before - tables.skills.len()) as u64)
    }

    async fn increment_views(&self, id: ProfileId) -> Result<u64, DomainError> {
        let mut tables = self.tables.write().await;
        let stored = tables.profiles.get_mut(&id).ok_or_else(|| not_found(id))?;
        stored.record_view();
        Ok(stored.views())
    }

    async fn delete(&self, id: ProfileId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.profiles.remove(&id).is_none() {
            return Err(not_found(id));
        }
        tables.skills.retain(|_, skill| skill.profile_id() != id);
        Ok(())
    }
}
