//! Core building blocks for the Spinovo admin client
//!
//! This crate provides the pieces every other crate leans on:
//!
//! - **Environment**: development/staging/production switch
//! - **Error handling**: four-kind error taxonomy with a classifier for raw failures
//! - **Retry**: async retry with exponential backoff and a retryability predicate
//! - **Validation**: input checks and sanitizers applied before network calls
//!
//! # Example
//!
//! ```rust,no_run
//! use spinovo_core::prelude::*;
//!
//! # async fn example() -> Result<(), AppError> {
//! let classifier = ErrorClassifier::new(Environment::from_env());
//! let policy = RetryPolicy::new(RetryConfig::default());
//!
//! let answer = policy
//!     .run(&classifier, "example", || async { Ok::<_, AppError>(42) })
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod environment;
pub mod error;
pub mod retry;
pub mod validation;

pub use environment::Environment;
pub use error::{AppError, ErrorClassifier, ErrorKind, Failure};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::environment::Environment;
    pub use crate::error::{AppError, ErrorClassifier, ErrorKind, ErrorReport, Failure, codes};
    pub use crate::retry::{RetryConfig, RetryPolicy};
    pub use crate::validation::Validator;
}
