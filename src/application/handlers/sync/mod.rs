//! GitHub synchronization handler.

mod sync_github;

pub use sync_github::{
    SyncError, SyncGitHubCommand, SyncGitHubHandler, SyncPolicy, SyncResult, SyncStatus,
};
