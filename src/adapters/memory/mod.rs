//! In-memory persistence.
//!
//! [`InMemoryStore`] owns the tables; the profile and skill repositories it
//! hands out share them, so deleting a profile also drops its skills like the
//! `ON DELETE CASCADE` of the PostgreSQL schema. Used by tests and when no
//! database URL is configured.

mod profile_repository;
mod skill_repository;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ProfileId, SkillId};
use crate::domain::profile::Profile;
use crate::domain::skill::Skill;

pub use profile_repository::InMemoryProfileRepository;
pub use skill_repository::InMemorySkillRepository;

#[derive(Debug, Default)]
struct Tables {
    profiles: HashMap<ProfileId, Profile>,
    skills: HashMap<SkillId, Skill>,
}

/// Profiles and skills held behind a single lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Profile repository backed by this store.
    pub fn profiles(&self) -> InMemoryProfileRepository {
        InMemoryProfileRepository::new(self.tables.clone())
    }

    /// Skill repository backed by this store.
    pub fn skills(&self) -> InMemorySkillRepository {
        InMemorySkillRepository::new(self.tables.clone())
    }

    /// Number of stored profiles.
    pub async fn profile_count(&self) -> usize {
        self.tables.read().await.profiles.len()
    }

    /// Number of stored skills across all profiles.
    pub async fn skill_count(&self) -> usize {
        self.tables.read().await.skills.len()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        let mut tables = self.tables.write().await;
        tables.profiles.clear();
        tables.skills.clear();
    }
}
