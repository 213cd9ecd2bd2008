//! Business logic services.

pub mod auth;
pub mod dashboard;
pub mod notice;
pub mod store;
pub mod upstream;
