//! CV profile aggregate, its GitHub snapshot and field rules.

mod aggregate;
mod snapshot;
mod values;

pub use aggregate::{ChangeOutcome, Profile, ProfileChanges, ProfileParts};
pub use snapshot::{SyncSnapshot, SNAPSHOT_REPO_LIMIT};
pub use values::{
    validate_github_username, validate_website, Theme, MAX_GITHUB_USERNAME_LEN, MAX_HEADLINE_LEN,
    MAX_LOCATION_LEN,
};
