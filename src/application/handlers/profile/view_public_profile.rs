//! ViewPublicProfileHandler - the public CV page, addressed by username.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::profile::{Profile, ProfileParts};
use crate::ports::{ProfileRepository, SkillRepository};

use super::ProfileView;

#[derive(Debug, Clone)]
pub struct ViewPublicProfileQuery {
    pub username: String,
}

/// Every successful read counts one view.
pub struct ViewPublicProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
    skills: Arc<dyn SkillRepository>,
}

impl ViewPublicProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, skills: Arc<dyn SkillRepository>) -> Self {
        Self { profiles, skills }
    }

    pub async fn handle(&self, query: ViewPublicProfileQuery) -> Result<ProfileView, DomainError> {
        let profile = self
            .profiles
            .find_public_by_username(&query.username)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ProfileNotFound,
                    format!("No public profile for '{}'", query.username),
                )
            })?;

        let views = self.profiles.increment_views(profile.id()).await?;
        let profile = Profile::reconstitute(ProfileParts {
            views,
            ..profile.parts().clone()
        });

        ProfileView::load(profile, self.skills.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::UserId;
    use crate::domain::profile::ProfileChanges;

    async fn setup(is_public: bool) -> (InMemoryStore, ViewPublicProfileHandler) {
        let store = InMemoryStore::new();
        let mut profile = Profile::new(UserId::new("alice-id").unwrap(), "alice");
        profile
            .apply_changes(ProfileChanges {
                is_public: Some(is_public),
                ..Default::default()
            })
            .unwrap();
        store.profiles().create(&profile).await.unwrap();
        let handler = ViewPublicProfileHandler::new(Arc::new(store.profiles()), Arc::new(store.skills()));
        (store, handler)
    }

    fn query(username: &str) -> ViewPublicProfileQuery {
        ViewPublicProfileQuery {
            username: username.to_string(),
        }
    }

    #[tokio::test]
    async fn each_read_counts_a_view() {
        let (_store, handler) = setup(true).await;

        assert_eq!(handler.handle(query("alice")).await.unwrap().profile.views(), 1);
        assert_eq!(handler.handle(query("alice")).await.unwrap().profile.views(), 2);
    }

    #[tokio::test]
    async fn private_profile_is_not_found() {
        let (store, handler) = setup(false).await;

        let err = handler.handle(query("alice")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ProfileNotFound);

        let stored = store.profiles().list_all().await.unwrap();
        assert_eq!(stored[0].views(), 0);
    }

    #[tokio::test]
    async fn unknown_username_is_not_found() {
        let (_store, handler) = setup(true).await;
        let err = handler.handle(query("nobody")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ProfileNotFound);
    }
}
