//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a set of admin endpoints.
//!
//! ## Mapping to the admin backend
//!
//! | Module | Paths | Description |
//! |--------|-------|-------------|
//! | `auth` | `/admin/auth/login`, `/admin/profile` | Login and profile |
//! | `dashboard` | `/admin/dashboard` | Headline counts and revenue |
//! | `customers` | `/admin/customer/...` | Customer list and details |
//! | `bookings` | `/admin/booking/...` | Bookings and copilot assignment |
//! | `copilots` | `/admin/copilot/...` | Copilot list, profile, creation |
//! | `assignments` | `/admin/assign/list` | Booking assignments |
//! | `transactions` | `/admin/customer/transactions` | Wallet transactions |
//! | `otp` | `/admin/customer/otpreques` | OTP request log |
//! | `locations` | `/admin/state...` | State, city and area hierarchy |
//! | `packages` | `/admin/package/...` | Subscription packages |

pub mod assignments;
pub mod auth;
pub mod bookings;
pub mod copilots;
pub mod customers;
pub mod dashboard;
pub mod locations;
pub mod otp;
pub mod packages;
pub mod transactions;

pub use assignments::AssignmentsApi;
pub use auth::AuthApi;
pub use bookings::BookingsApi;
pub use copilots::CopilotsApi;
pub use customers::CustomersApi;
pub use dashboard::DashboardApi;
pub use locations::LocationsApi;
pub use otp::OtpApi;
pub use packages::PackagesApi;
pub use transactions::TransactionsApi;

use crate::query::validate_pagination;

/// `base` with clamped `page` and `limit` query parameters
pub(crate) fn paged(base: &str, page: u32, limit: u32) -> String {
    let pagination = validate_pagination(f64::from(page), f64::from(limit));
    format!("{base}{}", pagination.query())
}
