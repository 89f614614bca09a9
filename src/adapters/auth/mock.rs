//! Mock session validator for testing.
//!
//! # Example
//!
//! ```ignore
//! use codecv::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new()
//!     .with_test_user("alice-token", "alice")
//!     .with_staff_user("admin-token", "admin");
//!
//! let user = validator.validate("alice-token").await?;
//! assert_eq!(user.username, "alice");
//! ```

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    /// Map of valid tokens to their associated users
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Adds a regular user whose id and username are both `username`.
    /// Blank usernames are ignored.
    pub fn with_test_user(self, token: impl Into<String>, username: &str) -> Self {
        match test_user(username, false) {
            Some(user) => self.with_user(token, user),
            None => self,
        }
    }

    /// Adds a staff user whose id and username are both `username`.
    pub fn with_staff_user(self, token: impl Into<String>, username: &str) -> Self {
        match test_user(username, true) {
            Some(user) => self.with_user(token, user),
            None => self,
        }
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *write(&self.force_error) = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *write(&self.force_error) = None;
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        write(&self.tokens).insert(token.into(), user);
    }

    /// Returns the number of registered valid tokens.
    pub fn token_count(&self) -> usize {
        read(&self.tokens).len()
    }
}

fn test_user(username: &str, is_staff: bool) -> Option<AuthenticatedUser> {
    let id = UserId::new(username).ok()?;
    Some(AuthenticatedUser::new(
        id,
        username,
        Some(format!("{}@test.example.com", username)),
        is_staff,
    ))
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = read(&self.force_error).clone() {
            return Err(error);
        }

        read(&self.tokens).get(token).cloned().ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_returns_user() {
        let validator = MockSessionValidator::new().with_test_user("t1", "alice");
        let user = validator.validate("t1").await.unwrap();
        assert_eq!(user.id.as_str(), "alice");
        assert!(!user.is_staff);
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        assert!(matches!(validator.validate("nope").await, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn forced_error_wins_until_cleared() {
        let validator = MockSessionValidator::new()
            .with_staff_user("t1", "admin")
            .with_error(AuthError::service_unavailable("down"));

        assert!(matches!(validator.validate("t1").await, Err(AuthError::ServiceUnavailable(_))));
        validator.clear_error();
        assert!(validator.validate("t1").await.unwrap().is_staff);
        assert_eq!(validator.token_count(), 1);
    }
}
