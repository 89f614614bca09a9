//! Authentication configuration (HS256 bearer tokens)

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::auth::JwtConfig;

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 signing secret
    #[serde(default)]
    pub jwt_secret: String,

    /// Expected `iss` claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,
}

impl AuthConfig {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::new(self.jwt_secret.clone(), self.issuer.clone(), self.audience.clone())
    }

    /// Validate authentication configuration
    ///
    /// Any non-empty secret is accepted outside production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("CODECV__AUTH__JWT_SECRET"));
        }
        if self.issuer.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CODECV__AUTH__ISSUER"));
        }
        if self.audience.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CODECV__AUTH__AUDIENCE"));
        }
        if *environment == Environment::Production && self.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::WeakJwtSecret);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: default_issuer(),
            audience: default_audience(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

fn default_issuer() -> String {
    "codecv-auth".to_string()
}

fn default_audience() -> String {
    "codecv-api".to_string()
}
