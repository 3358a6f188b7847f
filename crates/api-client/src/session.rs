//! Session storage and the authenticated session
//!
//! A session is three string keys in a [`SessionStore`]: the bearer token,
//! the admin user as JSON, and the token expiry in epoch milliseconds. The
//! expiry is checked on every read and never cached, so a logout by one
//! request or process is visible to the next.

use crate::error::{ApiResult, storage_error};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use spinovo_core::validation::{sanitize_mobile, sanitize_name};
use spinovo_telemetry::Logger;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::warn;

/// Store key holding the bearer token
pub const TOKEN_KEY: &str = "spinovo_admin_token";

/// Store key holding the admin user JSON
pub const USER_KEY: &str = "spinovo_admin_user";

/// Store key holding the token expiry (epoch milliseconds)
pub const TOKEN_EXPIRY_KEY: &str = "spinovo_token_expiry";

/// Lifetime granted to a token at login
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

static LOGGER: Logger = Logger::new("AuthService");

/// Key/value storage backing a session
///
/// Synchronous, like browser storage. Reads never fail; a value that
/// cannot be read is reported as absent.
pub trait SessionStore: Send + Sync {
    /// Value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> ApiResult<()>;

    /// Drop `key`; absent keys are ignored
    fn remove(&self, key: &str);
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        self.entries
            .write()
            .map_err(|_| storage_error("Session store lock poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

/// Store persisting a JSON object in a file
///
/// The file is re-read on every access so changes made by other processes
/// are picked up.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// `<data dir>/spinovo-admin/session.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("spinovo-admin").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> HashMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read session file");
                return HashMap::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
            HashMap::new()
        })
    }

    fn write_map(&self, map: &HashMap<String, String>) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                storage_error(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let body = serde_json::to_string_pretty(map)
            .map_err(|e| storage_error(format!("Failed to encode session: {e}")))?;

        // Readers never take the lock, so the file is replaced by rename and
        // is never observed half-written.
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let write_failed =
            |e: std::io::Error| storage_error(format!("Failed to write {}: {e}", self.path.display()));
        let mut staged = NamedTempFile::new_in(dir).map_err(write_failed)?;
        staged.write_all(body.as_bytes()).map_err(write_failed)?;
        staged.persist(&self.path).map_err(|e| write_failed(e.error))?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| storage_error("Session file lock poisoned"))?;
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) {
        let Ok(_guard) = self.write_lock.lock() else {
            return;
        };
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            if let Err(e) = self.write_map(&map) {
                warn!(key, error = %e, "Failed to remove session key");
            }
        }
    }
}

/// The signed-in administrator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub profile_pic: String,
    pub access_token: String,
    pub city_id: i64,
    pub admin_role: i64,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Coarse session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Authenticated,
    Unauthenticated,
    /// A token is stored but past its expiry; only reported by
    /// [`AuthSession::inspect`]
    Expired,
}

/// Authenticated session over a [`SessionStore`]
#[derive(Clone)]
pub struct AuthSession {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
    app_version: String,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("ttl", &self.ttl)
            .field("app_version", &self.app_version)
            .finish_non_exhaustive()
    }
}

impl AuthSession {
    pub fn new(store: Arc<dyn SessionStore>, app_version: impl Into<String>) -> Self {
        Self {
            store,
            ttl: DEFAULT_TOKEN_TTL,
            app_version: app_version.into(),
        }
    }

    /// Builder-style method to change the token lifetime
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn set_token(&self, token: &str) -> ApiResult<()> {
        self.store.set(TOKEN_KEY, token)?;
        LOGGER.debug("Token stored", None);
        Ok(())
    }

    /// Store the user with a tidied name and a digits-only mobile
    pub fn set_user(&self, user: &AdminUser) -> ApiResult<()> {
        let sanitized = AdminUser {
            name: sanitize_name(&user.name),
            mobile: sanitize_mobile(&user.mobile),
            ..user.clone()
        };
        let raw = serde_json::to_string(&sanitized)
            .map_err(|e| storage_error(format!("Failed to encode user: {e}")))?;
        self.store.set(USER_KEY, &raw)?;
        LOGGER.debug("User data stored", Some(json!({ "userId": user.id })));
        Ok(())
    }

    /// Expire the token `ttl` from now
    pub fn set_token_expiry(&self) -> ApiResult<()> {
        let ttl = chrono::Duration::from_std(self.ttl)
            .map_err(|e| storage_error(format!("Token lifetime out of range: {e}")))?;
        self.set_token_expiry_at(Utc::now() + ttl)
    }

    /// Expire the token at a fixed instant
    pub fn set_token_expiry_at(&self, at: DateTime<Utc>) -> ApiResult<()> {
        self.store
            .set(TOKEN_EXPIRY_KEY, &at.timestamp_millis().to_string())
    }

    /// Current token, if any and not expired
    ///
    /// A stored token that is expired, or has no readable expiry, ends the
    /// session.
    pub fn token(&self) -> Option<String> {
        let token = self.store.get(TOKEN_KEY)?;

        if self.is_token_expired() {
            LOGGER.warn("Token expired, clearing storage", None);
            self.logout();
            return None;
        }

        Some(token)
    }

    pub fn user(&self) -> Option<AdminUser> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                LOGGER.error(
                    "Failed to retrieve user data",
                    Some(json!({ "error": e.to_string() })),
                );
                None
            }
        }
    }

    /// Stored expiry, if present and readable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.store
            .get(TOKEN_EXPIRY_KEY)?
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis)
    }

    /// True when the expiry is missing, unreadable or in the past
    pub fn is_token_expired(&self) -> bool {
        self.expires_at().is_none_or(|at| Utc::now() > at)
    }

    /// Token, user and an unexpired expiry are all present
    ///
    /// Never touches the network.
    pub fn is_authenticated(&self) -> bool {
        let has_token = self.token().is_some();
        let has_user = self.user().is_some();
        let is_expired = self.is_token_expired();
        let is_valid = has_token && has_user && !is_expired;

        LOGGER.debug(
            "Authentication check",
            Some(json!({
                "hasToken": has_token,
                "hasUser": has_user,
                "isExpired": is_expired,
                "isValid": is_valid,
            })),
        );

        is_valid
    }

    /// Remove every session key; safe to call repeatedly
    pub fn logout(&self) {
        let user_id = self.user().map(|u| u.id);
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
        self.store.remove(TOKEN_EXPIRY_KEY);
        LOGGER.info("User logged out", Some(json!({ "userId": user_id })));
    }

    /// Session status, ending an expired session on the way
    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// Session status without side effects
    pub fn inspect(&self) -> SessionState {
        if self.store.get(TOKEN_KEY).is_none() {
            SessionState::Unauthenticated
        } else if self.is_token_expired() {
            SessionState::Expired
        } else if self.user().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// `Authorization` and `X-App-Version`, or nothing without a token
    pub fn auth_headers(&self) -> Vec<(&'static str, String)> {
        match self.token() {
            Some(token) => vec![
                ("Authorization", format!("Bearer {token}")),
                ("X-App-Version", self.app_version.clone()),
            ],
            None => Vec::new(),
        }
    }

    /// Version sent with every request
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (Arc<MemorySessionStore>, AuthSession) {
        let store = Arc::new(MemorySessionStore::new());
        let session = AuthSession::new(store.clone(), "1.0.0");
        (store, session)
    }

    fn admin() -> AdminUser {
        AdminUser {
            id: "adm1".into(),
            name: "  Asha   Rao ".into(),
            mobile: "+91 98765-43210".into(),
            ..AdminUser::default()
        }
    }

    fn sign_in(session: &AuthSession) {
        session.set_token("tok").unwrap();
        session.set_user(&admin()).unwrap();
        session.set_token_expiry().unwrap();
    }

    #[test]
    fn test_login_state_round() {
        let (_, session) = session();
        assert_eq!(session.state(), SessionState::Unauthenticated);

        sign_in(&session);
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("tok"));
        assert_eq!(session.inspect(), SessionState::Authenticated);

        let expires = session.expires_at().unwrap();
        let ttl = expires - Utc::now();
        assert!(ttl > chrono::Duration::hours(23) && ttl <= chrono::Duration::hours(24));
    }

    #[test]
    fn test_set_user_sanitizes() {
        let (_, session) = session();
        session.set_user(&admin()).unwrap();
        let user = session.user().unwrap();
        assert_eq!(user.name, "Asha Rao");
        assert_eq!(user.mobile, "919876543210");
    }

    #[test]
    fn test_expired_token_is_implicit_logout() {
        let (store, session) = session();
        sign_in(&session);
        session
            .set_token_expiry_at(Utc::now() - chrono::Duration::seconds(1))
            .unwrap();

        assert_eq!(session.inspect(), SessionState::Expired);
        assert!(!session.is_authenticated());
        assert!(store.get(TOKEN_KEY).is_none());
        assert!(store.get(USER_KEY).is_none());
        assert!(store.get(TOKEN_EXPIRY_KEY).is_none());
    }

    #[test]
    fn test_missing_or_garbage_expiry_counts_as_expired() {
        let (store, session) = session();
        session.set_token("tok").unwrap();
        assert!(session.is_token_expired());
        assert!(session.token().is_none());

        session.set_token("tok").unwrap();
        store.set(TOKEN_EXPIRY_KEY, "soon").unwrap();
        assert!(session.token().is_none());
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_token_without_user_is_not_authenticated() {
        let (_, session) = session();
        session.set_token("tok").unwrap();
        session.set_token_expiry().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.inspect(), SessionState::Unauthenticated);
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (_, session) = session();
        sign_in(&session);
        session.logout();
        session.logout();
        assert_eq!(session.state(), SessionState::Unauthenticated);
    }

    #[test]
    fn test_auth_headers() {
        let (_, session) = session();
        assert!(session.auth_headers().is_empty());

        sign_in(&session);
        assert_eq!(
            session.auth_headers(),
            vec![
                ("Authorization", "Bearer tok".to_string()),
                ("X-App-Version", "1.0.0".to_string()),
            ]
        );
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let first = Arc::new(FileSessionStore::new(&path));
        let session = AuthSession::new(first, "1.0.0");
        sign_in(&session);

        let second = AuthSession::new(Arc::new(FileSessionStore::new(&path)), "1.0.0");
        assert!(second.is_authenticated());

        second.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_file_store_readers_never_see_partial_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let session = AuthSession::new(Arc::new(FileSessionStore::new(&path)), "1.0.0");
        sign_in(&session);

        let writer = {
            let session = session.clone();
            std::thread::spawn(move || {
                for _ in 0..300 {
                    session.set_user(&admin()).unwrap();
                }
            })
        };

        let reader = AuthSession::new(Arc::new(FileSessionStore::new(&path)), "1.0.0");
        for i in 0..300 {
            assert_eq!(reader.token().as_deref(), Some("tok"), "session lost at read {i}");
        }
        writer.join().unwrap();

        assert!(session.is_authenticated());
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.get(TOKEN_KEY).is_none());
        store.set(TOKEN_KEY, "tok").unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok"));
    }
}
