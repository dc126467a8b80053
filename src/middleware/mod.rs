//! Cross-cutting HTTP middleware.
//!
//! - [`rate_limit`] - Per-IP token bucket limits
//! - [`tracing`] - Structured request/response logging

pub mod rate_limit;
pub mod tracing;
