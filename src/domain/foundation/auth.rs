//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a bearer token.
//! They have no provider dependencies; any token validator can populate them
//! via the `SessionValidator` port.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// Login name; addresses the user's public CV page.
    pub username: String,

    /// Email address from the token claims, if present.
    pub email: Option<String>,

    /// Staff users may read and manage every profile.
    pub is_staff: bool,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, username: impl Into<String>, email: Option<String>, is_staff: bool) -> Self {
        Self {
            id,
            username: username.into(),
            email,
            is_staff,
        }
    }

    /// Returns true when this user owns the resource or is staff.
    pub fn can_manage(&self, owner: &UserId) -> bool {
        self.is_staff || &self.id == owner
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}
