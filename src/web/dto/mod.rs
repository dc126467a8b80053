//! Form and response payloads of the panel pages.

pub mod forms;
pub mod health;
