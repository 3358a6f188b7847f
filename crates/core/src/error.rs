//! Error taxonomy and failure classification
//!
//! Every failure surfaced by the admin client is one of four kinds:
//!
//! | Kind | Default status | Default code |
//! |------|----------------|--------------|
//! | [`ErrorKind::Api`] | 500 | `API_ERROR` |
//! | [`ErrorKind::Network`] | 0 | `NETWORK_ERROR` |
//! | [`ErrorKind::Authentication`] | 401 | `AUTH_ERROR` |
//! | [`ErrorKind::Validation`] | 400 | `VALIDATION_ERROR` |
//!
//! Raw failures enter as a [`Failure`] and are normalized by
//! [`ErrorClassifier::classify`]. Retryability is only defined on the
//! classified [`AppError`].

use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Boxed error accepted as a failure cause
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shared cause kept inside an [`AppError`] so it stays `Clone`
pub type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Message used in production in place of unknown error details
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Message shown to users in production for internal (500) errors
pub const GENERIC_USER_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Stable string codes for programmatic handling
pub mod codes {
    /// Server rejected the request
    pub const API_ERROR: &str = "API_ERROR";
    /// Transport-level failure
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    /// Credentials missing, invalid or expired
    pub const AUTH_ERROR: &str = "AUTH_ERROR";
    /// Caller input failed local validation
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    /// Request ran out of time
    pub const TIMEOUT_ERROR: &str = "TIMEOUT_ERROR";
    /// Request could not be sent
    pub const FETCH_ERROR: &str = "FETCH_ERROR";
    /// Failure with no better classification
    pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";
    /// Response body did not match the expected shape
    pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";
    /// Configuration could not be loaded
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    /// Session storage could not be read or written
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

/// The four error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Server rejected the request or returned `status=false`
    Api,
    /// Transport failure, connection refused or timeout
    Network,
    /// Missing, invalid or expired credentials
    Authentication,
    /// Malformed caller input, detected before any network call
    Validation,
}

impl ErrorKind {
    /// Status code a fresh error of this kind carries
    pub fn default_status(self) -> u16 {
        match self {
            Self::Api => 500,
            Self::Network => 0,
            Self::Authentication => 401,
            Self::Validation => 400,
        }
    }

    /// Code a fresh error of this kind carries
    pub fn default_code(self) -> &'static str {
        match self {
            Self::Api => codes::API_ERROR,
            Self::Network => codes::NETWORK_ERROR,
            Self::Authentication => codes::AUTH_ERROR,
            Self::Validation => codes::VALIDATION_ERROR,
        }
    }

    /// Type-style name, e.g. `NetworkError`
    pub fn name(self) -> &'static str {
        match self {
            Self::Api => "ApiError",
            Self::Network => "NetworkError",
            Self::Authentication => "AuthenticationError",
            Self::Validation => "ValidationError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified failure
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    status_code: u16,
    code: String,
    context: Option<String>,
    #[source]
    source: Option<SharedError>,
}

impl AppError {
    /// Create an error of the given kind with that kind's defaults
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: kind.default_status(),
            code: kind.default_code().to_string(),
            context: None,
            source: None,
        }
    }

    /// Server-side failure carrying the HTTP status
    pub fn api(message: impl Into<String>, status_code: u16) -> Self {
        let mut err = Self::new(ErrorKind::Api, message);
        err.status_code = status_code;
        err
    }

    /// Transport-level failure
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// Request exceeded its time budget
    pub fn timeout() -> Self {
        Self::network("Request timeout").with_code(codes::TIMEOUT_ERROR)
    }

    /// Missing, invalid or expired credentials
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Malformed input
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Replace the code string
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Tag with the component that raised the error
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    fn with_boxed_source(mut self, source: Option<BoxError>) -> Self {
        self.source = source.map(SharedError::from);
        self
    }

    /// Error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Numeric status (HTTP status where one exists, 0 for transport failures)
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Stable string code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Component context, if tagged
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Whether this error is an authentication failure
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        self.kind == ErrorKind::Authentication
    }

    /// Whether a retry may succeed
    ///
    /// True iff the status is 5xx, the status is 0 (no response), or the
    /// code is `NETWORK_ERROR`.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.status_code >= 500 || self.status_code == 0 || self.code == codes::NETWORK_ERROR
    }

    /// Whether the status is in the 4xx range
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// Whether the status is in the 5xx range
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code >= 500
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind,
            name: self.kind.name().to_string(),
            code: self.code.clone(),
            status_code: self.status_code,
            message: self.message.clone(),
            context: self.context.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }
}

impl PartialEq for AppError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.message == other.message
            && self.status_code == other.status_code
            && self.code == other.code
            && self.context == other.context
    }
}

/// Serializable error report for logs and JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error kind
    pub kind: ErrorKind,
    /// Kind name, e.g. `ApiError`
    pub name: String,
    /// Stable code from [`codes`]
    pub code: String,
    /// HTTP-style status code
    pub status_code: u16,
    /// Human-readable message
    pub message: String,
    /// Operation the error occurred in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Rendered underlying cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// An unclassified failure
#[derive(Debug)]
pub enum Failure {
    /// Already one of the four kinds
    App(AppError),
    /// The operation was aborted because it ran out of time
    Timeout(Option<BoxError>),
    /// Connection refused, DNS failure or another transport-level error
    Transport(BoxError),
    /// Anything else
    Other(BoxError),
}

impl Failure {
    /// Timeout with an underlying cause
    pub fn timeout(source: impl Into<BoxError>) -> Self {
        Self::Timeout(Some(source.into()))
    }

    /// Transport-level failure
    pub fn transport(source: impl Into<BoxError>) -> Self {
        Self::Transport(source.into())
    }

    /// Unrecognized failure
    pub fn other(source: impl Into<BoxError>) -> Self {
        Self::Other(source.into())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::App(e) => write!(f, "{}: {}", e.kind(), e),
            Self::Timeout(Some(e)) => write!(f, "timeout: {e}"),
            Self::Timeout(None) => f.write_str("timeout"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Other(e) => write!(f, "{e}"),
        }
    }
}

impl From<AppError> for Failure {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<BoxError> for Failure {
    fn from(err: BoxError) -> Self {
        Self::Other(err)
    }
}

impl From<std::io::Error> for Failure {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind as Io;
        match err.kind() {
            Io::TimedOut => Self::timeout(err),
            Io::ConnectionRefused
            | Io::ConnectionReset
            | Io::ConnectionAborted
            | Io::NotConnected
            | Io::BrokenPipe => Self::transport(err),
            _ => Self::other(err),
        }
    }
}

/// Normalizes arbitrary failures into [`AppError`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorClassifier {
    environment: Environment,
}

impl ErrorClassifier {
    /// Create a classifier for the given environment
    pub const fn new(environment: Environment) -> Self {
        Self { environment }
    }

    /// Environment this classifier redacts for
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Classify a failure
    ///
    /// Already-classified errors are returned unchanged, so classifying twice
    /// yields the same error.
    pub fn classify(&self, failure: impl Into<Failure>, context: Option<&str>) -> AppError {
        let failure = failure.into();

        let classified = match failure {
            Failure::App(err) => {
                debug!(context = context.unwrap_or_default(), code = err.code(), error = %err, "Error passed through classifier");
                return err;
            }
            Failure::Timeout(source) => AppError::timeout().with_boxed_source(source),
            Failure::Transport(source) => AppError::network("Network connection failed")
                .with_code(codes::FETCH_ERROR)
                .with_boxed_source(Some(source)),
            Failure::Other(source) => {
                let message = if self.environment.is_production() {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    source.to_string()
                };
                AppError::api(message, 500)
                    .with_code(codes::UNKNOWN_ERROR)
                    .with_boxed_source(Some(source))
            }
        };

        let classified = match context {
            Some(ctx) => classified.with_context(ctx),
            None => classified,
        };

        error!(
            context = context.unwrap_or_default(),
            code = classified.code(),
            status = classified.status_code(),
            error = %classified,
            "Error occurred"
        );

        classified
    }

    /// Message safe to show to the operator
    pub fn user_message(&self, err: &AppError) -> String {
        if self.environment.is_production() && err.status_code() == 500 {
            GENERIC_USER_MESSAGE.to_string()
        } else {
            err.message().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn boxed(msg: &str) -> BoxError {
        Box::new(std::io::Error::other(msg.to_string()))
    }

    #[test]
    fn test_kind_defaults() {
        assert_eq!(AppError::api("x", 500).status_code(), 500);
        assert_eq!(AppError::network("x").status_code(), 0);
        assert_eq!(AppError::network("x").code(), codes::NETWORK_ERROR);
        assert_eq!(AppError::authentication("x").status_code(), 401);
        assert_eq!(AppError::authentication("x").code(), codes::AUTH_ERROR);
        assert_eq!(AppError::validation("x").status_code(), 400);
        assert_eq!(AppError::validation("x").code(), codes::VALIDATION_ERROR);
    }

    #[test]
    fn test_classify_passes_through_known_kinds() {
        let classifier = ErrorClassifier::new(Environment::Development);
        let original = AppError::validation("bad input").with_context("form");
        let classified = classifier.classify(original.clone(), Some("other"));
        assert_eq!(classified, original);
        assert_eq!(classified.context(), Some("form"));
    }

    #[test]
    fn test_classify_timeout() {
        let classifier = ErrorClassifier::new(Environment::Development);
        let err = classifier.classify(Failure::Timeout(None), Some("ApiClient"));
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.code(), codes::TIMEOUT_ERROR);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_classify_transport() {
        let classifier = ErrorClassifier::default();
        let err = classifier.classify(Failure::transport(boxed("connection refused")), None);
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.code(), codes::FETCH_ERROR);
        assert_eq!(err.status_code(), 0);
    }

    #[test]
    fn test_classify_io_errors() {
        let classifier = ErrorClassifier::default();
        let refused = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
        assert_eq!(classifier.classify(refused, None).code(), codes::FETCH_ERROR);
        let timed_out = std::io::Error::from(std::io::ErrorKind::TimedOut);
        assert_eq!(classifier.classify(timed_out, None).code(), codes::TIMEOUT_ERROR);
    }

    #[test]
    fn test_unknown_message_redacted_in_production() {
        let prod = ErrorClassifier::new(Environment::Production);
        let err = prod.classify(boxed("db password is hunter2"), None);
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.code(), codes::UNKNOWN_ERROR);
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(prod.user_message(&err), GENERIC_USER_MESSAGE);

        let dev = ErrorClassifier::new(Environment::Development);
        let err = dev.classify(boxed("db password is hunter2"), None);
        assert_eq!(err.message(), "db password is hunter2");
        assert_eq!(dev.user_message(&err), "db password is hunter2");
    }

    #[test]
    fn test_retryable_truth_table() {
        assert!(AppError::api("x", 500).is_retryable());
        assert!(AppError::api("x", 503).is_retryable());
        assert!(AppError::network("x").is_retryable());
        assert!(AppError::timeout().is_retryable());
        assert!(AppError::api("x", 404).with_code(codes::NETWORK_ERROR).is_retryable());
        assert!(!AppError::authentication("x").is_retryable());
        assert!(!AppError::validation("x").is_retryable());
        assert!(!AppError::api("x", 404).is_retryable());
        assert!(!AppError::api("x", 422).is_retryable());
    }

    #[test]
    fn test_error_report_serialization() {
        let err = AppError::api("Server error: 502", 502).with_context("ApiClient");
        let json = serde_json::to_string(&err.to_report()).unwrap();
        assert!(json.contains("ApiError"));
        assert!(json.contains("502"));
        assert!(!json.contains("source"));
    }

    fn arb_failure() -> impl Strategy<Value = Failure> {
        prop_oneof![
            proptest::strategy::LazyJust::new(|| Failure::Timeout(None)),
            "[a-z ]{0,20}".prop_map(|m| Failure::transport(boxed(&m))),
            "[a-z ]{0,20}".prop_map(|m| Failure::other(boxed(&m))),
            (any::<u16>(), "[a-z ]{0,20}").prop_map(|(s, m)| Failure::App(AppError::api(m, s))),
            "[a-z ]{0,20}".prop_map(|m| Failure::App(AppError::authentication(m))),
            "[a-z ]{0,20}".prop_map(|m| Failure::App(AppError::validation(m))),
        ]
    }

    proptest! {
        #[test]
        fn prop_classification_is_idempotent(failure in arb_failure(), prod in any::<bool>()) {
            let env = if prod { Environment::Production } else { Environment::Development };
            let classifier = ErrorClassifier::new(env);
            let once = classifier.classify(failure, Some("prop"));
            let twice = classifier.classify(once.clone(), Some("again"));
            prop_assert_eq!(&once, &twice);
        }

        #[test]
        fn prop_retryable_matches_rule(status in any::<u16>()) {
            let err = AppError::api("x", status);
            prop_assert_eq!(err.is_retryable(), status >= 500 || status == 0);
        }
    }
}
