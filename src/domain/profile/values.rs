//! Profile value objects and field rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

pub const MAX_HEADLINE_LEN: usize = 200;
pub const MAX_LOCATION_LEN: usize = 100;
pub const MAX_GITHUB_USERNAME_LEN: usize = 100;

/// GitHub rejects logins longer than this.
const GITHUB_LOGIN_MAX: usize = 39;

/// Colour theme of the public CV page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    GithubDark,
    GithubLight,
    Dracula,
    Monokai,
    Solarized,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GithubDark => "github-dark",
            Self::GithubLight => "github-light",
            Self::Dracula => "dracula",
            Self::Monokai => "monokai",
            Self::Solarized => "solarized",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github-dark" => Ok(Self::GithubDark),
            "github-light" => Ok(Self::GithubLight),
            "dracula" => Ok(Self::Dracula),
            "monokai" => Ok(Self::Monokai),
            "solarized" => Ok(Self::Solarized),
            other => Err(ValidationError::invalid_format(
                "theme",
                format!("unknown theme '{}'", other),
            )),
        }
    }
}

/// Checks a GitHub login: alphanumerics and single inner hyphens, 1–39 chars.
pub fn validate_github_username(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::empty_field("github_username"));
    }
    if value.len() > GITHUB_LOGIN_MAX {
        return Err(ValidationError::too_long("github_username", GITHUB_LOGIN_MAX));
    }
    if value.starts_with('-') || value.ends_with('-') || value.contains("--") {
        return Err(ValidationError::invalid_format(
            "github_username",
            "hyphens may only appear between characters",
        ));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::invalid_format(
            "github_username",
            "only letters, digits and hyphens are allowed",
        ));
    }
    Ok(())
}

/// Empty is allowed; otherwise an http(s) URL is required.
pub fn validate_website(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ValidationError::invalid_format(
            "website",
            "must start with http:// or https://",
        ))
    }
}

pub(crate) fn validate_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::too_long(field, max));
    }
    Ok(())
}
