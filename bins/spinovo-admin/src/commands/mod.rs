//! Command implementations

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
