//! Hosted domain entity and its status lifecycle.

use std::fmt;

/// Status of a hosted domain as stored in `domain.domain_status`.
///
/// Only [`DomainStatus::Ok`] and [`DomainStatus::Disabled`] are stable states.
/// Everything else (`toadd`, `tochange`, `todisable`, `toenable`, error
/// strings from the provisioning backend) is kept verbatim in
/// [`DomainStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainStatus {
    Ok,
    Disabled,
    Other(String),
}

impl DomainStatus {
    /// Parses a raw status column value.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "ok" => Self::Ok,
            "disabled" => Self::Disabled,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "ok",
            Self::Disabled => "disabled",
            Self::Other(raw) => raw,
        }
    }

    /// Action that flips a stable status to the other stable status.
    ///
    /// Returns `None` for any status outside `ok`/`disabled`.
    pub fn toggle_action(&self) -> Option<StatusAction> {
        match self {
            Self::Ok => Some(StatusAction::Deactivate),
            Self::Disabled => Some(StatusAction::Activate),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account lifecycle operation requested for a customer's domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Activate,
    Deactivate,
}

impl StatusAction {
    /// Status the domain must currently have for this action to apply.
    pub fn source_status(self) -> &'static str {
        match self {
            Self::Activate => "disabled",
            Self::Deactivate => "ok",
        }
    }

    /// Transitional status written for the provisioning backend to complete.
    pub fn pending_status(self) -> &'static str {
        match self {
            Self::Activate => "toenable",
            Self::Deactivate => "todisable",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
        }
    }
}

impl fmt::Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The columns of a `domain` row the status toggle works with.
#[derive(Debug, Clone)]
pub struct DomainRecord {
    pub id: i64,
    pub name: String,
    pub admin_id: i64,
    pub status: DomainStatus,
}

/// A domain row joined with its owner, as listed on the users page.
#[derive(Debug, Clone)]
pub struct DomainSummary {
    pub id: i64,
    pub name: String,
    pub admin_id: i64,
    pub admin_name: String,
    pub status: DomainStatus,
}

impl DomainSummary {
    /// Whether the row can be flipped from the users page.
    pub fn is_toggleable(&self) -> bool {
        self.status.toggle_action().is_some()
    }
}
