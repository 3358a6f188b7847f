//! Deployment environment detection

use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable holding the deployment environment name
pub const ENV_VAR: &str = "SPINOVO_ENV";

/// Deployment environment
///
/// Controls log verbosity, error reporting and how much detail error
/// messages expose to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development: everything is logged, messages are never redacted
    Development,
    /// Staging: production-like log gating without error reporting
    Staging,
    /// Production
    #[default]
    Production,
}

impl Environment {
    /// Parse from the `SPINOVO_ENV` environment variable
    pub fn from_env() -> Self {
        env::var(ENV_VAR)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// Parse an environment name, falling back to production
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }

    /// Whether this is a development environment
    #[must_use]
    pub fn is_development(self) -> bool {
        self == Self::Development
    }

    /// Whether this is the production environment
    #[must_use]
    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    /// Lowercase name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
