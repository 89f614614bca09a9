//! HS256 JWT adapter for the `SessionValidator` port.
//!
//! Tokens are issued by the identity provider that fronts the API and
//! signed with a shared secret. Validation checks:
//! - **Signature**: HS256 with the configured secret
//! - **Issuer (iss)** and **Audience (aud)**: must match configuration
//! - **Expiry (exp)**: must be in the future
//!
//! # Example
//!
//! ```ignore
//! let validator = JwtSessionValidator::new(JwtConfig::new(secret, "codecv-auth", "codecv-api"));
//! let user = validator.validate("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Configuration for HS256 token validation.
#[derive(Clone)]
pub struct JwtConfig {
    secret: Secret<String>,
    /// Expected `iss` claim.
    pub issuer: String,
    /// Expected `aud` claim.
    pub audience: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

/// Claims carried by CodeCV access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject - the user ID
    pub sub: String,
    /// Login name, used for the public profile URL
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    pub iss: String,
    pub aud: String,
    /// Expiry timestamp (Unix epoch seconds)
    pub exp: i64,
}

/// Validates HS256 bearer tokens.
pub struct JwtSessionValidator {
    config: JwtConfig,
    decoding_key: DecodingKey,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());
        Self {
            config,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "sub", "aud"]);
        validation
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation()).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::warn!(error = %e, "Token validation failed");
                    AuthError::InvalidToken
                }
            }
        })?;
        let claims = data.claims;

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Token has a blank subject");
            AuthError::InvalidToken
        })?;
        let username = claims
            .username
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| claims.sub.clone());

        Ok(AuthenticatedUser::new(user_id, username, claims.email, claims.is_staff))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}
