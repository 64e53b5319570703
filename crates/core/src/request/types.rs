//! Request entities.
//!
//! Both entities share the same shape: immutable creation fields, a status
//! driven exclusively by the transition engine, and append-only per-stage
//! audit records. Stage records are `Option<StageRecord>` so "populated
//! exactly once, never cleared" is the only representable lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use setora_shared::types::{Amount, CapitalRequestId, CashDepositId, UserId};

use crate::workflow::types::{CapitalEvent, CapitalStatus, DepositEvent, DepositStatus};

/// Audit record for one completed approval stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    /// The user who performed the stage.
    pub actor: UserId,
    /// When the stage was performed.
    pub at: DateTime<Utc>,
    /// Free-text notes recorded at the stage.
    pub notes: Option<String>,
}

/// A capital request moving through outlet → operator → finance → disbursed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalRequest {
    /// Surrogate identifier, assigned at creation.
    pub id: CapitalRequestId,
    /// Unique human-readable code (`CAP-YYYYMMDD-NNNN`), immutable.
    pub code: String,
    /// The outlet user who created the request; never mutated.
    pub outlet: UserId,
    /// The requested amount.
    pub amount: Amount,
    /// What the capital is for.
    pub purpose: String,
    /// Current workflow status.
    pub status: CapitalStatus,
    /// Operator approval record.
    pub operator: Option<StageRecord>,
    /// Finance approval record.
    pub finance: Option<StageRecord>,
    /// When the funds were disbursed.
    pub disbursed_at: Option<DateTime<Utc>>,
    /// When the request was rejected.
    pub rejected_at: Option<DateTime<Utc>>,
    /// Why the request was rejected.
    pub rejection_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency version, bumped by the store on save.
    pub version: u64,
}

impl CapitalRequest {
    /// Creates a new request in `Pending` status.
    #[must_use]
    pub fn new(
        id: CapitalRequestId,
        code: String,
        outlet: UserId,
        amount: Amount,
        purpose: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            outlet,
            amount,
            purpose,
            status: CapitalStatus::Pending,
            operator: None,
            finance: None,
            disbursed_at: None,
            rejected_at: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Applies a validated transition event, stamping its stage fields.
    pub fn apply(&mut self, event: CapitalEvent) {
        self.status = event.new_status();
        self.updated_at = event.occurred_at();
        match event {
            CapitalEvent::OperatorApproved { actor, at, notes } => {
                self.operator = Some(StageRecord { actor, at, notes });
            }
            CapitalEvent::FinanceApproved { actor, at, notes } => {
                self.finance = Some(StageRecord { actor, at, notes });
            }
            CapitalEvent::Disbursed { at } => {
                self.disbursed_at = Some(at);
            }
            CapitalEvent::Rejected { at, reason } => {
                self.rejected_at = Some(at);
                self.rejection_reason = Some(reason);
            }
        }
    }
}

/// A cash deposit moving through outlet → sales → operator → finance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashDeposit {
    /// Surrogate identifier, assigned at creation.
    pub id: CashDepositId,
    /// Unique human-readable code (`DEP-YYYYMMDD-NNNN`), immutable.
    pub code: String,
    /// The outlet user who created the deposit; never mutated.
    pub outlet: UserId,
    /// The deposited amount.
    pub amount: Amount,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Current workflow status.
    pub status: DepositStatus,
    /// Sales verification record.
    pub sales: Option<StageRecord>,
    /// Operator approval record.
    pub operator: Option<StageRecord>,
    /// Finance reconciliation record.
    pub finance: Option<StageRecord>,
    /// Depositor assigned at operator approval, if any was eligible.
    pub depositor: Option<UserId>,
    /// When the deposit was rejected.
    pub rejected_at: Option<DateTime<Utc>>,
    /// Why the deposit was rejected.
    pub rejection_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency version, bumped by the store on save.
    pub version: u64,
}

impl CashDeposit {
    /// Creates a new deposit in `Pending` status.
    #[must_use]
    pub fn new(
        id: CashDepositId,
        code: String,
        outlet: UserId,
        amount: Amount,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            outlet,
            amount,
            description,
            status: DepositStatus::Pending,
            sales: None,
            operator: None,
            finance: None,
            depositor: None,
            rejected_at: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Applies a validated transition event, stamping its stage fields.
    pub fn apply(&mut self, event: DepositEvent) {
        self.status = event.new_status();
        self.updated_at = event.occurred_at();
        match event {
            DepositEvent::SalesApproved { actor, at, notes } => {
                self.sales = Some(StageRecord { actor, at, notes });
            }
            DepositEvent::OperatorApproved {
                actor,
                at,
                notes,
                depositor,
            } => {
                self.operator = Some(StageRecord { actor, at, notes });
                self.depositor = depositor;
            }
            DepositEvent::FinanceApproved { actor, at, notes } => {
                self.finance = Some(StageRecord { actor, at, notes });
            }
            DepositEvent::Rejected { at, reason } => {
                self.rejected_at = Some(at);
                self.rejection_reason = Some(reason);
            }
        }
    }
}
