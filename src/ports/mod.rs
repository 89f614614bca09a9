//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GitHubSource` - Read access to GitHub users and repositories
//! - `ProfileRepository` / `SkillRepository` - Persistence
//! - `SessionValidator` - Bearer token validation

mod github_source;
mod profile_repository;
mod session_validator;
mod skill_repository;

pub use github_source::{GitHubError, GitHubSource};
pub use profile_repository::ProfileRepository;
pub use session_validator::SessionValidator;
pub use skill_repository::SkillRepository;
