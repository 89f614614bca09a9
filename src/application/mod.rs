//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::profile::{
    CreateProfileCommand, CreateProfileHandler, DeleteProfileCommand, DeleteProfileHandler,
    GetOrCreateProfileHandler, GetOrCreateProfileQuery, GetProfileHandler, GetProfileQuery,
    LanguageStat, ListProfilesHandler, ListProfilesQuery, ProfileView, UpdateProfileCommand,
    UpdateProfileHandler, ViewPublicProfileHandler, ViewPublicProfileQuery,
};
pub use handlers::skill::{
    CreateSkillCommand, CreateSkillHandler, DeleteSkillCommand, DeleteSkillHandler,
    GetSkillHandler, GetSkillQuery, ListSkillsHandler, ListSkillsQuery, UpdateSkillCommand,
    UpdateSkillHandler,
};
pub use handlers::sync::{
    SyncError, SyncGitHubCommand, SyncGitHubHandler, SyncPolicy, SyncResult, SyncStatus,
};
