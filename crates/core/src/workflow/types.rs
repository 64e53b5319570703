//! Workflow domain types for the approval state machines.
//!
//! This module defines the statuses, actions, and transition events for
//! both workflows. Statuses and actions are closed enums per workflow
//! type, never free strings, so an illegal state is unrepresentable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use setora_shared::types::{Role, UserId};

/// Capital request status in the approval workflow.
///
/// The valid transitions are:
/// - Pending → OperatorApproved (operator_approve)
/// - OperatorApproved → FinanceApproved (finance_approve)
/// - FinanceApproved → Disbursed (disburse)
/// - Pending | OperatorApproved → Rejected (reject)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapitalStatus {
    /// Submitted by an outlet, waiting for the operator.
    Pending,
    /// Approved by an operator, waiting for finance.
    OperatorApproved,
    /// Approved by finance, waiting for disbursement.
    FinanceApproved,
    /// Funds disbursed (terminal).
    Disbursed,
    /// Rejected at some stage (terminal).
    Rejected,
}

impl CapitalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::OperatorApproved => "operator_approved",
            Self::FinanceApproved => "finance_approved",
            Self::Disbursed => "disbursed",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "operator_approved" => Some(Self::OperatorApproved),
            "finance_approved" => Some(Self::FinanceApproved),
            "disbursed" => Some(Self::Disbursed),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if no further transition is defined from this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Disbursed | Self::Rejected)
    }
}

impl fmt::Display for CapitalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cash deposit status in the approval workflow.
///
/// The valid transitions are:
/// - Pending → SalesApproved (sales_approve)
/// - SalesApproved → OperatorApproved (operator_approve, assigns a depositor)
/// - OperatorApproved → FinanceApproved (finance_approve)
/// - Pending | SalesApproved | OperatorApproved → Rejected (reject)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositStatus {
    /// Submitted by an outlet, waiting for sales verification.
    Pending,
    /// Verified by sales, waiting for the operator.
    SalesApproved,
    /// Approved by an operator and assigned a depositor, waiting for finance.
    OperatorApproved,
    /// Reconciled by finance (terminal).
    FinanceApproved,
    /// Rejected at some stage (terminal).
    Rejected,
}

impl DepositStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::SalesApproved => "sales_approved",
            Self::OperatorApproved => "operator_approved",
            Self::FinanceApproved => "finance_approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "sales_approved" => Some(Self::SalesApproved),
            "operator_approved" => Some(Self::OperatorApproved),
            "finance_approved" => Some(Self::FinanceApproved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if no further transition is defined from this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::FinanceApproved | Self::Rejected)
    }
}

impl fmt::Display for DepositStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action requested against a capital request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapitalAction {
    /// Operator approval of a pending request.
    OperatorApprove,
    /// Finance approval of an operator-approved request.
    FinanceApprove,
    /// Disbursement of a finance-approved request.
    Disburse,
    /// Rejection of a not-yet-terminal request.
    Reject,
}

impl CapitalAction {
    /// Parses an action from its wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "operator_approve" => Some(Self::OperatorApprove),
            "finance_approve" => Some(Self::FinanceApprove),
            "disburse" => Some(Self::Disburse),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    /// Returns the wire name of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OperatorApprove => "operator_approve",
            Self::FinanceApprove => "finance_approve",
            Self::Disburse => "disburse",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for CapitalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action requested against a cash deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositAction {
    /// Sales verification of a pending deposit.
    SalesApprove,
    /// Operator approval of a sales-approved deposit.
    OperatorApprove,
    /// Finance reconciliation of an operator-approved deposit.
    FinanceApprove,
    /// Rejection of a not-yet-terminal deposit.
    Reject,
}

impl DepositAction {
    /// Parses an action from its wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sales_approve" => Some(Self::SalesApprove),
            "operator_approve" => Some(Self::OperatorApprove),
            "finance_approve" => Some(Self::FinanceApprove),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    /// Returns the wire name of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SalesApprove => "sales_approve",
            Self::OperatorApprove => "operator_approve",
            Self::FinanceApprove => "finance_approve",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for DepositAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The acting user, as supplied by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// The user performing the action.
    pub id: UserId,
    /// The user's role.
    pub role: Role,
}

impl Actor {
    /// Creates an actor from its parts.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }
}

/// Payload accompanying a requested action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionInput {
    /// Free-text notes recorded on the stage being approved.
    pub notes: Option<String>,
    /// Rejection reason; required for the reject action.
    pub reason: Option<String>,
}

impl ActionInput {
    /// Payload with approval notes only.
    #[must_use]
    pub fn with_notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            reason: None,
        }
    }

    /// Payload with a rejection reason only.
    #[must_use]
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            notes: None,
            reason: Some(reason.into()),
        }
    }
}

/// Validated transition of a capital request, carrying the audit data to
/// stamp onto the entity.
#[derive(Debug, Clone)]
pub enum CapitalEvent {
    /// Operator approved a pending request.
    OperatorApproved {
        /// The approving operator.
        actor: UserId,
        /// When the approval happened.
        at: DateTime<Utc>,
        /// Optional notes from the operator.
        notes: Option<String>,
    },
    /// Finance approved an operator-approved request.
    FinanceApproved {
        /// The approving finance user.
        actor: UserId,
        /// When the approval happened.
        at: DateTime<Utc>,
        /// Optional notes from finance.
        notes: Option<String>,
    },
    /// Finance disbursed the approved funds.
    Disbursed {
        /// When the funds were disbursed.
        at: DateTime<Utc>,
    },
    /// The request was rejected.
    Rejected {
        /// When the rejection happened.
        at: DateTime<Utc>,
        /// The reason for rejection.
        reason: String,
    },
}

impl CapitalEvent {
    /// Returns the status resulting from this event.
    #[must_use]
    pub fn new_status(&self) -> CapitalStatus {
        match self {
            Self::OperatorApproved { .. } => CapitalStatus::OperatorApproved,
            Self::FinanceApproved { .. } => CapitalStatus::FinanceApproved,
            Self::Disbursed { .. } => CapitalStatus::Disbursed,
            Self::Rejected { .. } => CapitalStatus::Rejected,
        }
    }

    /// Returns the event timestamp.
    #[must_use]
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::OperatorApproved { at, .. }
            | Self::FinanceApproved { at, .. }
            | Self::Disbursed { at }
            | Self::Rejected { at, .. } => *at,
        }
    }
}

/// Validated transition of a cash deposit.
#[derive(Debug, Clone)]
pub enum DepositEvent {
    /// Sales verified a pending deposit.
    SalesApproved {
        /// The verifying sales user.
        actor: UserId,
        /// When the verification happened.
        at: DateTime<Utc>,
        /// Optional notes from sales.
        notes: Option<String>,
    },
    /// Operator approved a sales-approved deposit.
    OperatorApproved {
        /// The approving operator.
        actor: UserId,
        /// When the approval happened.
        at: DateTime<Utc>,
        /// Optional notes from the operator.
        notes: Option<String>,
        /// Depositor assigned to execute the deposit, if any was eligible.
        depositor: Option<UserId>,
    },
    /// Finance reconciled an operator-approved deposit.
    FinanceApproved {
        /// The reconciling finance user.
        actor: UserId,
        /// When the reconciliation happened.
        at: DateTime<Utc>,
        /// Optional notes from finance.
        notes: Option<String>,
    },
    /// The deposit was rejected.
    Rejected {
        /// When the rejection happened.
        at: DateTime<Utc>,
        /// The reason for rejection.
        reason: String,
    },
}

impl DepositEvent {
    /// Returns the status resulting from this event.
    #[must_use]
    pub fn new_status(&self) -> DepositStatus {
        match self {
            Self::SalesApproved { .. } => DepositStatus::SalesApproved,
            Self::OperatorApproved { .. } => DepositStatus::OperatorApproved,
            Self::FinanceApproved { .. } => DepositStatus::FinanceApproved,
            Self::Rejected { .. } => DepositStatus::Rejected,
        }
    }

    /// Returns the event timestamp.
    #[must_use]
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::SalesApproved { at, .. }
            | Self::OperatorApproved { at, .. }
            | Self::FinanceApproved { at, .. }
            | Self::Rejected { at, .. } => *at,
        }
    }
}
