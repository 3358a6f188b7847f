//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{
    AssignmentsApi, AuthApi, BookingsApi, CopilotsApi, CustomersApi, DashboardApi, LocationsApi,
    OtpApi, PackagesApi, TransactionsApi,
};
use crate::envelope::{ApiEnvelope, RawEnvelope};
use crate::error::{ApiResult, config_error, failure_from_reqwest};
use crate::session::{AuthSession, FileSessionStore, MemorySessionStore, SessionStore};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use spinovo_core::error::{AppError, ErrorClassifier, Failure};
use spinovo_core::retry::RetryPolicy;
use spinovo_telemetry::Logger;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Version header sent with every request
pub(crate) const X_APP_VERSION: &str = "X-App-Version";

static LOGGER: Logger = Logger::new("ApiClient");

/// Callback fired when the server ends the session
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Method, extra headers and JSON body of one request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method
    pub method: Method,
    /// Extra headers, applied before the managed ones
    pub headers: Vec<(String, String)>,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl RequestOptions {
    /// Options for `method` with no headers or body
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Attach a JSON body
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Add a header; `Content-Type` and `Authorization` are always replaced
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Spinovo admin API client
///
/// Cheap to clone; clones share the HTTP pool and the session store.
/// Every authenticated call:
/// - Reads the token from the session on each attempt
/// - Runs under the configured retry policy
/// - Ends the session when the server rejects the credentials
#[derive(Clone)]
pub struct SpinovoClient {
    inner: Client,
    config: Arc<ClientConfig>,
    session: AuthSession,
    classifier: ErrorClassifier,
    retry: RetryPolicy,
    on_session_expired: Option<SessionExpiredHook>,
}

impl fmt::Debug for SpinovoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinovoClient")
            .field("base_url", &self.config.base_url)
            .field("environment", &self.config.environment)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl SpinovoClient {
    /// Create a client over an explicit session store
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("spinovo-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|e| config_error(format!("Failed to build HTTP client: {e}")).with_source(e))?;

        let retry = RetryPolicy::new(config.retry.clone()).when(|err| {
            err.is_retryable() && !err.is_authentication() && !err.is_client_error()
        });

        Ok(Self {
            inner,
            session: AuthSession::new(store, config.app_version.clone()),
            classifier: ErrorClassifier::new(config.environment),
            retry,
            config: Arc::new(config),
            on_session_expired: None,
        })
    }

    /// Create a client from the environment with the file-backed session
    pub fn from_env() -> ApiResult<Self> {
        Self::with_file_session(ClientConfig::from_env()?)
    }

    /// Create a client persisting its session at `config.session_path()`
    pub fn with_file_session(config: ClientConfig) -> ApiResult<Self> {
        let store: Arc<dyn SessionStore> = match config.session_path() {
            Some(path) => Arc::new(FileSessionStore::new(path)),
            None => {
                warn!("No data directory found, session will not persist");
                Arc::new(MemorySessionStore::new())
            }
        };
        Self::new(config, store)
    }

    /// Call `hook` whenever the server ends the session
    #[must_use]
    pub fn with_session_expired_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_session_expired = Some(Arc::new(hook));
        self
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The session this client authenticates with
    #[must_use]
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Classifier configured for this client's environment
    #[must_use]
    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Login, profile and token checks
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Summary counts
    #[must_use]
    pub fn dashboard(&self) -> DashboardApi {
        DashboardApi::new(self.clone())
    }

    /// Customer listing and details
    #[must_use]
    pub fn customers(&self) -> CustomersApi {
        CustomersApi::new(self.clone())
    }

    /// Booking listing, details and assignment
    #[must_use]
    pub fn bookings(&self) -> BookingsApi {
        BookingsApi::new(self.clone())
    }

    /// Copilot management
    #[must_use]
    pub fn copilots(&self) -> CopilotsApi {
        CopilotsApi::new(self.clone())
    }

    /// Booking to copilot assignment
    #[must_use]
    pub fn assignments(&self) -> AssignmentsApi {
        AssignmentsApi::new(self.clone())
    }

    /// Payment transactions
    #[must_use]
    pub fn transactions(&self) -> TransactionsApi {
        TransactionsApi::new(self.clone())
    }

    /// OTP request listing
    #[must_use]
    pub fn otp(&self) -> OtpApi {
        OtpApi::new(self.clone())
    }

    /// States, cities and areas
    #[must_use]
    pub fn locations(&self) -> LocationsApi {
        LocationsApi::new(self.clone())
    }

    /// Subscription packages
    #[must_use]
    pub fn packages(&self) -> PackagesApi {
        PackagesApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Authenticated requests
    // -------------------------------------------------------------------------

    /// Perform an authenticated GET
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiEnvelope<T>> {
        self.request(path, RequestOptions::new(Method::GET), false).await
    }

    /// Perform an authenticated POST with a JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiEnvelope<T>> {
        let options = RequestOptions::new(Method::POST).with_json(body)?;
        self.request(path, options, false).await
    }

    /// Perform an authenticated PUT with a JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiEnvelope<T>> {
        let options = RequestOptions::new(Method::PUT).with_json(body)?;
        self.request(path, options, false).await
    }

    /// Perform an authenticated DELETE
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiEnvelope<T>> {
        self.request(path, RequestOptions::new(Method::DELETE), false).await
    }

    /// Perform an authenticated request
    ///
    /// Unless `skip_retry` is set, retryable failures (network errors and
    /// 5xx) are retried with backoff. Authentication failures and other
    /// 4xx responses are returned immediately.
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
        skip_retry: bool,
    ) -> ApiResult<ApiEnvelope<T>> {
        let context = format!("{} {path}", options.method);

        if skip_retry {
            return self.send_once(path, &options).await.inspect_err(|err| {
                error!(context = %context, code = err.code(), error = %err, "Request failed");
            });
        }

        self.retry
            .run(&self.classifier, &context, || self.send_once(path, &options))
            .await
    }

    /// One attempt, from token lookup to decoded envelope
    async fn send_once<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> ApiResult<ApiEnvelope<T>> {
        let token = self
            .session
            .token()
            .ok_or_else(|| AppError::authentication("No authentication token found"))?;

        let request_id = Uuid::new_v4().to_string();
        let headers = self.build_headers(&request_id, &token, &options.headers)?;

        let mut builder = self
            .inner
            .request(options.method.clone(), self.config.url_for(path))
            .headers(headers);
        if let Some(ref body) = options.body {
            builder = builder.json(body);
        }

        let (status, body) = self.exchange(builder, &request_id, path).await?;
        self.decode(status, &body)
    }

    /// Caller headers first, then the headers callers may not override
    fn build_headers(
        &self,
        request_id: &str,
        token: &str,
        extra: &[(String, String)],
    ) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(X_APP_VERSION, header_value(&self.config.app_version)?);
        headers.insert(X_REQUEST_ID, header_value(request_id)?);

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| AppError::validation(format!("Invalid header name: {name}")))?;
            headers.insert(name, header_value(value)?);
        }

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {token}"))?);
        Ok(headers)
    }

    /// Send a request and read its body within the configured timeout
    pub(crate) async fn exchange(
        &self,
        builder: RequestBuilder,
        request_id: &str,
        path: &str,
    ) -> ApiResult<(StatusCode, Vec<u8>)> {
        let start = Instant::now();
        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body.to_vec()))
        };

        let (status, body) = match tokio::time::timeout(self.config.timeout, exchange).await {
            Ok(Ok(pair)) => pair,
            Ok(Err(e)) => return Err(self.classifier.classify(failure_from_reqwest(e), Some(path))),
            Err(elapsed) => return Err(self.classifier.classify(Failure::timeout(elapsed), Some(path))),
        };

        debug!(
            request_id = %request_id,
            path,
            status = status.as_u16(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Response received"
        );

        Ok((status, body))
    }

    /// Map status and envelope onto the error taxonomy
    fn decode<T: DeserializeOwned>(&self, status: StatusCode, body: &[u8]) -> ApiResult<ApiEnvelope<T>> {
        let code = status.as_u16();

        if status == StatusCode::UNAUTHORIZED {
            self.end_session("Authentication failed");
            return Err(AppError::authentication("Authentication failed"));
        }
        if status.is_server_error() {
            return Err(AppError::api(format!("Server error: {code}"), code));
        }
        if !status.is_success() {
            return Err(AppError::api(format!("HTTP error: {code}"), code));
        }

        let raw = RawEnvelope::parse(body, code)?;
        if !raw.status {
            let lowered = raw.msg.to_lowercase();
            if lowered.contains("unauthorized") || lowered.contains("token") {
                self.end_session(&raw.msg);
                return Err(AppError::authentication(raw.msg));
            }

            let message = if raw.msg.is_empty() {
                "API request failed".to_string()
            } else {
                raw.msg
            };
            return Err(AppError::api(message, code));
        }

        raw.decode(code)
    }

    /// Tear down the session and notify the hook
    pub(crate) fn end_session(&self, reason: &str) {
        LOGGER.warn("Session ended by server", Some(json!({ "reason": reason })));
        self.session.logout();
        if let Some(ref hook) = self.on_session_expired {
            hook();
        }
    }

    /// Underlying HTTP client, for requests that bypass the session
    pub(crate) fn http(&self) -> &Client {
        &self.inner
    }
}

fn header_value(value: &str) -> ApiResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| AppError::validation(format!("Invalid header value: {value:?}")))
}
