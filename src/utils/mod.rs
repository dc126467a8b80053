//! Utility functions shared across layers.
//!
//! - [`input`] - Form input normalization

pub mod input;
