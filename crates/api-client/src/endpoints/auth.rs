//! Authentication endpoints
//!
//! Login is the only call made without a session: it sends just
//! `Content-Type` and `X-App-Version`, and is never retried.

use crate::client::{RequestOptions, SpinovoClient, X_APP_VERSION};
use crate::envelope::{ApiEnvelope, RawEnvelope};
use crate::error::ApiResult;
use crate::session::AdminUser;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::json;
use spinovo_core::AppError;
use spinovo_core::validation::{is_valid_mobile, is_valid_password};
use spinovo_telemetry::Logger;
use tracing::debug;
use uuid::Uuid;

const LOGIN_PATH: &str = "/admin/auth/login";
const PROFILE_PATH: &str = "/admin/profile";

static LOGGER: Logger = Logger::new("AuthService");

/// Authentication API interface
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: SpinovoClient,
}

impl AuthApi {
    pub(crate) fn new(client: SpinovoClient) -> Self {
        Self { client }
    }

    /// Sign in and start a session
    ///
    /// POST /admin/auth/login
    ///
    /// The input is checked before anything is sent. A successful envelope
    /// carrying an access token stores the token, the user and a fresh
    /// expiry; the envelope is returned either way.
    pub async fn login(&self, mobile: &str, password: &str) -> ApiResult<ApiEnvelope<LoginData>> {
        let mobile = mobile.trim();

        if !is_valid_mobile(mobile) {
            debug!(mobile, "Invalid mobile number format");
            return Err(AppError::validation("Invalid mobile number format"));
        }
        if !is_valid_password(password) {
            debug!("Invalid password format");
            return Err(AppError::validation("Invalid password format"));
        }

        LOGGER.info("Attempting login", Some(json!({ "mobile": mobile })));

        self.send_login(mobile, password).await.inspect_err(|err| {
            LOGGER.error("Login error", Some(json!({ "error": err.message() })));
        })
    }

    async fn send_login(&self, mobile: &str, password: &str) -> ApiResult<ApiEnvelope<LoginData>> {
        let config = self.client.config();
        let builder = self
            .client
            .http()
            .request(Method::POST, config.url_for(LOGIN_PATH))
            .header(CONTENT_TYPE, "application/json")
            .header(X_APP_VERSION, config.app_version.as_str())
            .json(&LoginRequest { mobile, password });

        let request_id = Uuid::new_v4().to_string();
        let (status, body) = self.client.exchange(builder, &request_id, LOGIN_PATH).await?;
        let code = status.as_u16();

        if !status.is_success() {
            return Err(AppError::api(format!("Login failed: {code}"), code));
        }

        let envelope: ApiEnvelope<LoginData> = RawEnvelope::parse(&body, code)?.decode(code)?;

        match envelope.data.as_ref().and_then(|d| d.user.as_ref()) {
            Some(user) if envelope.status && !user.access_token.is_empty() => {
                let session = self.client.session();
                session.set_token(&user.access_token)?;
                session.set_user(user)?;
                session.set_token_expiry()?;
                LOGGER.info("Login successful", Some(json!({ "userId": user.id })));
            }
            _ => LOGGER.warn("Login failed", Some(json!({ "message": envelope.msg }))),
        }

        Ok(envelope)
    }

    /// Fetch the signed-in admin and refresh the stored user
    ///
    /// GET /admin/profile
    pub async fn profile(&self) -> ApiResult<ApiEnvelope<ProfileData>> {
        LOGGER.debug("Fetching profile", None);

        let envelope: ApiEnvelope<ProfileData> = self
            .client
            .request(PROFILE_PATH, RequestOptions::new(Method::GET), true)
            .await
            .inspect_err(|err| {
                LOGGER.error("Profile fetch error", Some(json!({ "error": err.message() })));
            })?;

        if let Some(profile) = envelope.data.as_ref().and_then(|d| d.profile.as_ref()) {
            if envelope.status {
                self.client.session().set_user(profile)?;
                LOGGER.debug("Profile updated", Some(json!({ "userId": profile.id })));
            }
        }

        Ok(envelope)
    }

    /// Confirm the session with the server
    ///
    /// False without a local session. Any failure ends the session.
    pub async fn validate_token(&self) -> bool {
        if !self.client.session().is_authenticated() {
            return false;
        }

        match self.profile().await {
            Ok(envelope) => envelope.status,
            Err(err) => {
                LOGGER.error("Token validation failed", Some(json!({ "error": err.message() })));
                self.client.session().logout();
                false
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    mobile: &'a str,
    password: &'a str,
}

/// `data` of a login response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginData {
    pub user: Option<AdminUser>,
}

/// `data` of a profile response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileData {
    pub profile: Option<AdminUser>,
}
