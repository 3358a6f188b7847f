//! Telemetry and logging for Spinovo tools
//!
//! This crate wires `tracing` up for the admin client:
//! - Environment-gated log levels (everything in development, warnings and
//!   errors elsewhere, debug on request)
//! - Compact or JSON output on stderr
//! - An injectable error-reporting hook for production
//! - A context-tagged [`Logger`] facade

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use spinovo_core::Environment;
use std::env;
use std::sync::Arc;
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use uuid::Uuid;

mod logger;
mod reporting;

pub use logger::{LogPolicy, Logger, level_gate};
pub use reporting::{ErrorReporter, LogEntry, ReportingLayer};

/// Environment variable enabling debug output outside development
pub const DEBUG_ENV_VAR: &str = "SPINOVO_DEBUG";

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Initialize telemetry from the environment, without error reporting
pub fn init() -> anyhow::Result<()> {
    init_with_config(TelemetryConfig::from_env())
}

/// Initialize with custom configuration
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    install(&config, None)
}

/// Initialize with custom configuration and an error reporter
///
/// The reporter only receives events when the environment is production.
pub fn init_with_reporter(
    config: TelemetryConfig,
    reporter: Arc<dyn ErrorReporter>,
) -> anyhow::Result<()> {
    install(&config, Some(reporter))
}

fn install(config: &TelemetryConfig, reporter: Option<Arc<dyn ErrorReporter>>) -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(subscriber(config, reporter))
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::info!(
        session_id = %session_id(),
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Build the subscriber stack without installing it
///
/// `RUST_LOG`, when set and `respect_rust_log` is on, replaces the
/// environment gate entirely.
pub fn subscriber(
    config: &TelemetryConfig,
    reporter: Option<Arc<dyn ErrorReporter>>,
) -> impl Subscriber + Send + Sync {
    let env_filter = if config.respect_rust_log {
        EnvFilter::try_from_default_env().ok()
    } else {
        None
    };
    let gate = env_filter.is_none().then(|| level_gate(config.policy()));

    let reporting = reporter
        .filter(|_| config.environment.is_production())
        .map(ReportingLayer::new);

    let json_layer = config.json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(config.show_target)
    });
    let compact_layer = (!config.json).then(|| {
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(config.show_target)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(gate)
        .with(json_layer)
        .with(compact_layer)
        .with(reporting)
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub environment: Environment,
    /// Emit debug events outside development
    pub debug_enabled: bool,
    /// JSON lines instead of compact text
    pub json: bool,
    pub show_target: bool,
    /// Let `RUST_LOG` override the environment gate
    pub respect_rust_log: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            debug_enabled: false,
            json: false,
            show_target: false,
            respect_rust_log: true,
        }
    }
}

impl TelemetryConfig {
    /// Read `SPINOVO_ENV` and `SPINOVO_DEBUG`
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            debug_enabled: env::var(DEBUG_ENV_VAR).is_ok_and(|v| v.eq_ignore_ascii_case("true")),
            ..Self::default()
        }
    }

    /// Configuration for a given environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    /// Builder-style method to enable debug output
    #[must_use]
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_enabled = enabled;
        self
    }

    /// Builder-style method to switch to JSON output
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Level policy derived from this configuration
    pub fn policy(&self) -> LogPolicy {
        LogPolicy {
            environment: self.environment,
            debug_enabled: self.debug_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeReporter {
        entries: Mutex<Vec<LogEntry>>,
    }

    impl ErrorReporter for FakeReporter {
        fn report(&self, entry: &LogEntry) {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }

    fn no_rust_log(environment: Environment) -> TelemetryConfig {
        TelemetryConfig {
            respect_rust_log: false,
            ..TelemetryConfig::for_environment(environment)
        }
    }

    #[test]
    fn test_reporter_invoked_once_per_error_in_production() {
        let reporter = Arc::new(FakeReporter::default());
        let sub = subscriber(&no_rust_log(Environment::Production), Some(reporter.clone() as Arc<dyn ErrorReporter>));

        tracing::subscriber::with_default(sub, || {
            let logger = Logger::new("AuthService");
            logger.error("Login error", Some(serde_json::json!({"error": "boom"})));
            logger.warn("Token expired", None);
            logger.info("Attempting login", None);
            logger.error("Profile fetch error", None);
        });

        let entries = reporter.entries.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "Login error");
        assert_eq!(entries[0].context.as_deref(), Some("AuthService"));
        assert_eq!(entries[0].data, Some(serde_json::json!({"error": "boom"})));
        assert_eq!(entries[1].message, "Profile fetch error");
    }

    #[test]
    fn test_reporter_not_invoked_outside_production() {
        let reporter = Arc::new(FakeReporter::default());
        let sub = subscriber(&no_rust_log(Environment::Development), Some(reporter.clone() as Arc<dyn ErrorReporter>));

        tracing::subscriber::with_default(sub, || {
            Logger::new("test").error("boom", None);
        });

        assert!(reporter.entries.lock().unwrap().is_empty());
    }

    #[test]
    fn test_config_policy() {
        let config = TelemetryConfig::for_environment(Environment::Production).with_debug(true);
        let policy = config.policy();
        assert!(policy.debug_enabled);
        assert!(policy.environment.is_production());
    }

    #[test]
    fn test_session_id() {
        let id = session_id();
        assert!(!id.is_empty());
        assert!(Uuid::parse_str(id).is_ok());
    }
}
