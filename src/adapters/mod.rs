//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - bearer token validation (JWT, mock)
//! - `github` - GitHub REST client and mock
//! - `http` - axum REST API
//! - `memory` - in-memory repositories
//! - `postgres` - PostgreSQL repositories

pub mod auth;
pub mod github;
pub mod http;
pub mod memory;
pub mod postgres;
