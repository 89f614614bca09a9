//! Shared application state for the REST API.

use std::sync::Arc;

use crate::application::{
    CreateProfileHandler, CreateSkillHandler, DeleteProfileHandler, DeleteSkillHandler,
    GetOrCreateProfileHandler, GetProfileHandler, GetSkillHandler, ListProfilesHandler,
    ListSkillsHandler, SyncGitHubHandler, SyncPolicy, UpdateProfileHandler, UpdateSkillHandler,
    ViewPublicProfileHandler,
};
use crate::ports::{GitHubSource, ProfileRepository, SkillRepository};

/// Arc-wrapped collaborators, cloned per request. Handlers are built on
/// demand from them.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileRepository>,
    pub skills: Arc<dyn SkillRepository>,
    pub github: Arc<dyn GitHubSource>,
    pub sync_policy: SyncPolicy,
}

impl AppState {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        skills: Arc<dyn SkillRepository>,
        github: Arc<dyn GitHubSource>,
        sync_policy: SyncPolicy,
    ) -> Self {
        Self {
            profiles,
            skills,
            github,
            sync_policy,
        }
    }

    pub fn get_or_create_profile_handler(&self) -> GetOrCreateProfileHandler {
        GetOrCreateProfileHandler::new(self.profiles.clone(), self.skills.clone())
    }

    pub fn create_profile_handler(&self) -> CreateProfileHandler {
        CreateProfileHandler::new(self.profiles.clone(), self.skills.clone())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.profiles.clone(), self.skills.clone())
    }

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.profiles.clone(), self.skills.clone())
    }

    pub fn list_profiles_handler(&self) -> ListProfilesHandler {
        ListProfilesHandler::new(self.profiles.clone(), self.skills.clone())
    }

    pub fn delete_profile_handler(&self) -> DeleteProfileHandler {
        DeleteProfileHandler::new(self.profiles.clone())
    }

    pub fn view_public_profile_handler(&self) -> ViewPublicProfileHandler {
        ViewPublicProfileHandler::new(self.profiles.clone(), self.skills.clone())
    }

    pub fn sync_github_handler(&self) -> SyncGitHubHandler {
        SyncGitHubHandler::new(
            self.profiles.clone(),
            self.github.clone(),
            self.sync_policy,
        )
    }

    pub fn create_skill_handler(&self) -> CreateSkillHandler {
        CreateSkillHandler::new(self.profiles.clone(), self.skills.clone())
    }

    pub fn update_skill_handler(&self) -> UpdateSkillHandler {
        UpdateSkillHandler::new(self.profiles.clone(), self.skills.clone())
    }

    pub fn delete_skill_handler(&self) -> DeleteSkillHandler {
        DeleteSkillHandler::new(self.profiles.clone(), self.skills.clone())
    }

    pub fn get_skill_handler(&self) -> GetSkillHandler {
        GetSkillHandler::new(self.profiles.clone(), self.skills.clone())
    }

    pub fn list_skills_handler(&self) -> ListSkillsHandler {
        ListSkillsHandler::new(self.profiles.clone(), self.skills.clone())
    }
}
