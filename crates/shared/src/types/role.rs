//! User roles in the approval hierarchy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role held by a user, driving both workflow permissions and visibility.
///
/// Unlike a privilege ladder, these roles are peers: each one owns a fixed
/// step of the approval sequence, so there is no ordering between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Creates capital requests and cash deposits.
    Outlet,
    /// Verifies cash deposits at the first stage.
    Sales,
    /// Approves at the middle stage of both workflows.
    Operator,
    /// Physically executes an assigned cash deposit.
    #[serde(rename = "penyetor")]
    Depositor,
    /// Final approver; also disburses capital requests.
    Finance,
    /// Full read access, no part in the approval sequence.
    Admin,
}

impl Role {
    /// Parse a role from a string.
    ///
    /// Accepts the legacy "penyetor" spelling alongside "depositor".
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "outlet" => Some(Self::Outlet),
            "sales" => Some(Self::Sales),
            "operator" => Some(Self::Operator),
            "penyetor" | "depositor" => Some(Self::Depositor),
            "finance" => Some(Self::Finance),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Outlet => "outlet",
            Self::Sales => "sales",
            Self::Operator => "operator",
            Self::Depositor => "penyetor",
            Self::Finance => "finance",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
