//! HTTP request handlers for the propdesk API.
//!
//! Handlers follow a consistent pattern: input validation with the exact
//! error contract, tracing for observability, and standardized JSON error
//! responses.
//!
//! # Handler Organization
//!
//! - `update` - the admin mutation endpoint
//! - `health` - health check and readiness probes

pub mod health;
pub mod update;

pub use health::{health_check, liveness_check, readiness_check};
pub use update::update_properties;
