//! Profile handlers.
//!
//! ## Commands
//! - Create, update and delete a profile
//!
//! ## Queries
//! - Get or lazily create the caller's profile
//! - Get one profile, list visible profiles
//! - Public profile page (counts a view)

mod create_profile;
mod delete_profile;
mod get_or_create_profile;
mod get_profile;
mod list_profiles;
mod profile_view;
mod update_profile;
mod view_public_profile;

// Commands
pub use create_profile::{CreateProfileCommand, CreateProfileHandler};
pub use delete_profile::{DeleteProfileCommand, DeleteProfileHandler};
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};

// Queries
pub use get_or_create_profile::{GetOrCreateProfileHandler, GetOrCreateProfileQuery};
pub use get_profile::{GetProfileHandler, GetProfileQuery};
pub use list_profiles::{ListProfilesHandler, ListProfilesQuery};
pub use view_public_profile::{ViewPublicProfileHandler, ViewPublicProfileQuery};

pub use profile_view::{LanguageStat, ProfileView, TOP_LANGUAGES};

pub(crate) use get_or_create_profile::find_or_create_profile;
