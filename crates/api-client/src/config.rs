//! Configuration for the Spinovo admin API client
//!
//! Supports environment-based configuration, TOML files and sensible defaults.

use crate::error::{ApiResult, config_error};
use serde::{Deserialize, Serialize};
use spinovo_core::Environment;
use spinovo_core::retry::RetryConfig;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default production API URL
pub const DEFAULT_API_URL: &str = "https://api.spinovo.in/api/v1";

/// Default application name
pub const DEFAULT_APP_NAME: &str = "Spinovo Admin Panel";

/// Default application version, sent as `X-App-Version`
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Application name
    pub app_name: String,
    /// Version sent in `X-App-Version`
    pub app_version: String,
    /// Per-request timeout
    #[serde(rename = "timeout_secs", with = "duration_secs")]
    pub timeout: Duration,
    /// Retry configuration for authenticated requests
    pub retry: RetryConfig,
    /// Current environment
    pub environment: Environment,
    /// Emit debug logs outside development
    pub debug: bool,
    /// Session file for the file-backed store
    pub session_file: Option<PathBuf>,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            app_version: DEFAULT_APP_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
            environment: Environment::default(),
            debug: false,
            session_file: None,
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `SPINOVO_API_URL`: Base URL of the admin API
    /// - `SPINOVO_APP_NAME`: Application name
    /// - `SPINOVO_APP_VERSION`: Version sent in `X-App-Version`
    /// - `SPINOVO_ENV`: Environment (development/staging/production)
    /// - `SPINOVO_DEBUG`: `true` enables debug logs outside development
    /// - `SPINOVO_TIMEOUT_SECS`: Request timeout in seconds
    /// - `SPINOVO_SESSION_FILE`: Location of the session file
    pub fn from_env() -> ApiResult<Self> {
        let environment = Environment::from_env();

        let base_url = env::var("SPINOVO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let app_name = env::var("SPINOVO_APP_NAME").unwrap_or_else(|_| DEFAULT_APP_NAME.to_string());
        let app_version =
            env::var("SPINOVO_APP_VERSION").unwrap_or_else(|_| DEFAULT_APP_VERSION.to_string());
        let debug = env::var("SPINOVO_DEBUG").is_ok_and(|v| v.eq_ignore_ascii_case("true"));

        let timeout = match env::var("SPINOVO_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| config_error(format!("SPINOVO_TIMEOUT_SECS is not a number: {raw}")))?,
            Err(_) => DEFAULT_TIMEOUT,
        };

        let retry = match environment {
            Environment::Development => RetryConfig::quick(),
            Environment::Staging | Environment::Production => RetryConfig::default(),
        };

        let config = Self {
            base_url,
            app_name,
            app_version,
            timeout,
            retry,
            environment,
            debug,
            session_file: env::var_os("SPINOVO_SESSION_FILE").map(PathBuf::from),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// Missing keys take their default values.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| config_error(format!("Invalid config {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Create development configuration (local API)
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: "http://localhost:4000/api/v1".to_string(),
            timeout: Duration::from_secs(10),
            retry: RetryConfig::quick(),
            environment: Environment::Development,
            ..Self::default()
        }
    }

    /// Create production configuration
    #[must_use]
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            ..Self::default()
        }
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the app version
    #[must_use]
    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = version.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Builder-style method to set the environment
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Builder-style method to set the session file
    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Session file location, falling back to the platform data directory
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session_file
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("spinovo-admin").join("session.json")))
    }

    /// Join an endpoint path onto the base URL
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(config_error("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(config_error("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(config_error("timeout cannot be zero"));
        }

        if self.retry.max_attempts == 0 {
            return Err(config_error("retry.max_attempts must be at least 1"));
        }

        if self.app_version.trim().is_empty() {
            return Err(config_error("app_version cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinovo_core::error::{ErrorKind, codes};
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.spinovo.in/api/v1");
        assert_eq!(config.app_version, "1.0.0");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_development_config() {
        let config = ClientConfig::development();
        assert!(config.base_url.contains("localhost"));
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("https://staging.spinovo.in/api/v1")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.base_url, "https://staging.spinovo.in/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_url_for_joins_single_slash() {
        let config = ClientConfig::default().with_base_url("http://localhost:1234/api/v1/");
        assert_eq!(
            config.url_for("/admin/dashboard"),
            "http://localhost:1234/api/v1/admin/dashboard"
        );
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());

        let err = ClientConfig::default().with_base_url("").validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.code(), codes::CONFIG_ERROR);

        assert!(ClientConfig::default().with_base_url("ftp://x").validate().is_err());
        assert!(ClientConfig::default().with_timeout(Duration::ZERO).validate().is_err());
        assert!(ClientConfig::default().with_app_version(" ").validate().is_err());

        let mut no_attempts = ClientConfig::default();
        no_attempts.retry.max_attempts = 0;
        assert!(no_attempts.validate().is_err());
    }

    #[test]
    fn test_from_toml_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
base_url = "http://localhost:9000/api/v1"
timeout_secs = 5
environment = "staging"

[retry]
max_attempts = 2
initial_delay_ms = 100
"#
        )
        .unwrap();

        let config = ClientConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.retry.max_attempts, 2);
        assert_eq!(config.retry.initial_delay, Duration::from_millis(100));
        assert_eq!(config.app_version, DEFAULT_APP_VERSION);
    }

    #[test]
    fn test_from_toml_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = 0").unwrap();

        let err = ClientConfig::from_toml_file(file.path()).unwrap_err();
        assert_eq!(err.code(), codes::CONFIG_ERROR);
    }

    #[test]
    fn test_session_path_override() {
        let config = ClientConfig::default().with_session_file("/tmp/spinovo.json");
        assert_eq!(config.session_path(), Some(PathBuf::from("/tmp/spinovo.json")));
    }
}
