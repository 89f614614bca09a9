//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth)
//! - `github` - Typed GitHub records and language aggregation
//! - `profile` - CV profile aggregate and its sync snapshot
//! - `skill` - Skill entity and language classification

pub mod foundation;
pub mod github;
pub mod profile;
pub mod skill;
