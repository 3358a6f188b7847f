//! Error helpers for the API client
//!
//! The client surfaces [`AppError`] everywhere; this module maps transport
//! and decoding failures onto it.

use spinovo_core::error::{AppError, Failure, codes};

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, AppError>;

/// Configuration rejected by [`crate::config::ClientConfig::validate`] or a loader
pub(crate) fn config_error(message: impl Into<String>) -> AppError {
    AppError::validation(message).with_code(codes::CONFIG_ERROR)
}

/// Session storage could not be written
pub(crate) fn storage_error(message: impl Into<String>) -> AppError {
    AppError::api(message, 500).with_code(codes::STORAGE_ERROR)
}

/// Body of a response with `status` did not decode as the expected JSON
pub(crate) fn invalid_response(source: serde_json::Error, status: u16) -> AppError {
    AppError::api(format!("Invalid response body: {source}"), status)
        .with_code(codes::INVALID_RESPONSE)
        .with_source(source)
}

/// Sort a `reqwest` failure into the classifier's input buckets
pub(crate) fn failure_from_reqwest(err: reqwest::Error) -> Failure {
    if err.is_timeout() {
        Failure::timeout(err)
    } else if err.is_decode() || err.is_builder() {
        Failure::other(err)
    } else {
        Failure::transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinovo_core::error::ErrorKind;

    #[test]
    fn test_config_error_is_validation() {
        let err = config_error("bad");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.code(), codes::CONFIG_ERROR);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_invalid_response_not_retryable() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = invalid_response(source, 200);
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.code(), codes::INVALID_RESPONSE);
        assert_eq!(err.status_code(), 200);
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:9/unreachable")
            .send()
            .await
            .unwrap_err();
        assert!(matches!(failure_from_reqwest(err), Failure::Transport(_)));
    }
}
