//! Profile read model shared by every profile query.

use serde::Serialize;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::github::RepoRecord;
use crate::domain::profile::{Profile, SNAPSHOT_REPO_LIMIT};
use crate::domain::skill::Skill;
use crate::ports::SkillRepository;

/// Languages shown on a profile page.
pub const TOP_LANGUAGES: usize = 8;

/// A language and the number of repositories using it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageStat {
    pub name: String,
    pub count: u64,
}

/// A profile together with its skills and the GitHub data worth showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub profile: Profile,
    /// Ordered by `(order, name)`.
    pub skills: Vec<Skill>,
}

impl ProfileView {
    /// Loads the skills of `profile` and builds the view.
    pub async fn load(profile: Profile, skills: &dyn SkillRepository) -> Result<Self, DomainError> {
        let skills = skills.list_by_profile(profile.id()).await?;
        Ok(Self { profile, skills })
    }

    pub fn skills_count(&self) -> usize {
        self.skills.len()
    }

    /// Repositories from the last sync, most recently updated first.
    pub fn github_repos(&self) -> &[RepoRecord] {
        match self.profile.last_sync() {
            Some(snapshot) => {
                let end = snapshot.repos.len().min(SNAPSHOT_REPO_LIMIT);
                &snapshot.repos[..end]
            }
            None => &[],
        }
    }

    /// Most used languages from the last sync.
    pub fn github_languages(&self) -> Vec<LanguageStat> {
        self.profile
            .last_sync()
            .map(|snapshot| {
                snapshot
                    .languages
                    .top(TOP_LANGUAGES)
                    .into_iter()
                    .map(|(name, count)| LanguageStat { name, count })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn last_synced_at(&self) -> Option<Timestamp> {
        self.profile.last_sync().map(|snapshot| snapshot.synced_at)
    }
}
