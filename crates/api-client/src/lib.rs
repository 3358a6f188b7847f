//! API client for the Spinovo admin backend
//!
//! This crate provides an authenticated, resilient HTTP client for the
//! admin endpoints of the Spinovo laundry service.
//!
//! # Features
//!
//! - **Environment-based configuration**: Load URLs and timeouts from environment variables or TOML
//! - **Session handling**: Token, user and expiry kept in a pluggable [`SessionStore`]
//! - **Retry with exponential backoff**: Network failures and 5xx responses are retried
//! - **Session teardown**: Rejected credentials end the session and notify a hook
//! - **Request correlation**: Every request carries a unique `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use spinovo_api_client::SpinovoClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SpinovoClient::from_env()?;
//!
//!     client.auth().login("9876543210", "password123").await?;
//!
//!     let dashboard = client.dashboard().get().await?.into_data()?;
//!     println!("{} customers", dashboard.total_customers);
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod query;
pub mod session;

pub use client::{RequestOptions, SessionExpiredHook, SpinovoClient};
pub use config::ClientConfig;
pub use envelope::ApiEnvelope;
pub use error::ApiResult;
pub use session::{
    AdminUser, AuthSession, FileSessionStore, MemorySessionStore, SessionState, SessionStore,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::{RequestOptions, SpinovoClient};
    pub use crate::config::ClientConfig;
    pub use crate::endpoints::{
        AssignmentsApi, AuthApi, BookingsApi, CopilotsApi, CustomersApi, DashboardApi,
        LocationsApi, OtpApi, PackagesApi, TransactionsApi,
    };
    pub use crate::envelope::ApiEnvelope;
    pub use crate::error::ApiResult;
    pub use crate::query::{Pagination, build_query_string, validate_pagination};
    pub use crate::session::{AdminUser, AuthSession, SessionState, SessionStore};
    pub use spinovo_core::{AppError, Environment, ErrorKind};
}
