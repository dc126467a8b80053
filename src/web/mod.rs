//! Server-rendered panel pages.
//!
//! Uses Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`dto`] - Query, form and JSON payloads
//! - [`handlers`] - Page handlers
//! - [`middleware`] - Cookie session
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
