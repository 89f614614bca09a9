//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresProfileRepository` - profiles, GitHub snapshot as `JSONB`;
//!   sync results and account switches are written in one transaction
//! - `PostgresSkillRepository` - single-skill CRUD
//!
//! Schema lives in `migrations/` and is applied with `sqlx::migrate!`.

mod profile_repository;
mod skill_repository;

pub use profile_repository::PostgresProfileRepository;
pub use skill_repository::PostgresSkillRepository;
