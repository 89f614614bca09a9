//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `CODECV` prefix and `__`
//! between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use codecv::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod github;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use github::GitHubConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL; `None` selects the in-memory store
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub github: GitHubConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `.env` when present, then every `CODECV__*` variable:
    ///
    /// - `CODECV__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CODECV__DATABASE__URL=...` -> `database.url = ...`
    /// - `CODECV__GITHUB__TOKEN=...` -> `github.token = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("CODECV").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.auth.validate(&self.server.environment)?;
        self.github.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
