//! Request extractors for sessions and route guards.

pub mod auth;
pub mod guard;
