//! ProfileRepository port for profile persistence operations

use async_trait::async_trait;

use crate::domain::{
    foundation::{DomainError, ProfileId, UserId},
    profile::{Profile, SyncSnapshot},
    skill::{SkillCategory, SkillDraft},
};

/// Repository for CV profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert a new profile. Fails with `Conflict` when the user already has one.
    async fn create(&self, profile: &Profile) -> Result<(), DomainError>;

    /// Overwrite an existing profile, snapshot included. The view counter is
    /// only changed through `increment_views`.
    async fn update(&self, profile: &Profile) -> Result<(), DomainError>;

    /// Find profile by profile ID
    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>, DomainError>;

    /// Find profile by owning user
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;

    /// Find a public profile by its owner's username.
    async fn find_public_by_username(&self, username: &str) -> Result<Option<Profile>, DomainError>;

    /// All profiles, oldest first.
    async fn list_all(&self) -> Result<Vec<Profile>, DomainError>;

    /// Public profiles plus the ones owned by `viewer`, oldest first.
    async fn list_visible_to(&self, viewer: Option<&UserId>) -> Result<Vec<Profile>, DomainError>;

    /// Store the outcome of a GitHub sync: replace the snapshot and upsert
    /// one skill per draft, keyed by `(profile_id, name)`. Skills with other
    /// names are left alone. Either every write lands or none does.
    async fn apply_sync(
        &self,
        id: ProfileId,
        snapshot: &SyncSnapshot,
        skills: &[SkillDraft],
    ) -> Result<(), DomainError>;

    /// `update` plus removal of the profile's skills in `categories`, as a
    /// single write. Returns how many skills were removed.
    async fn update_dropping_skills(
        &self,
        profile: &Profile,
        categories: &[SkillCategory],
    ) -> Result<u64, DomainError>;

    /// Increment the view counter and return the new value.
    async fn increment_views(&self, id: ProfileId) -> Result<u64, DomainError>;

    /// Delete a profile and, with it, its skills.
    async fn delete(&self, id: ProfileId) -> Result<(), DomainError>;
}
