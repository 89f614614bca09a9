//! Typed GitHub REST records.
//!
//! Only the fields the CV page uses are modelled. Required fields are plain
//! types so a response missing them fails deserialization at the client
//! boundary instead of producing a half-empty snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// A GitHub account as returned by `GET /users/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub login: String,
    pub id: u64,
    pub html_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub public_repos: Option<u32>,
    #[serde(default)]
    pub followers: Option<u32>,
    #[serde(default)]
    pub following: Option<u32>,
}

/// A repository as returned by `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Primary language as detected by GitHub; absent for empty or docs-only repos.
    #[serde(default)]
    pub language: Option<String>,
}
