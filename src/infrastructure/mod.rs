//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain layer.
//!
//! - [`persistence`] - PostgreSQL repository implementations

pub mod persistence;
