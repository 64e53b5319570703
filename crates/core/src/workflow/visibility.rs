//! Read-side visibility scopes.
//!
//! Each role may only list a slice of the requests: its own, those sitting
//! at its stage of the workflow, or everything for admins. The scope is a
//! query predicate consumed by the stores; it never gates transitions,
//! which are authorized solely by the engine's rule tables.

use setora_shared::types::{Role, UserId};

use crate::workflow::types::{CapitalStatus, DepositStatus};

/// Predicate restricting which requests a listing query may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<S: 'static> {
    /// Every request, any status.
    All,
    /// Requests created by this outlet user, any status.
    OwnedBy(UserId),
    /// Requests assigned to this depositor, any status.
    AssignedTo(UserId),
    /// Requests currently in one of these statuses.
    Statuses(&'static [S]),
    /// No requests at all (role not involved in this workflow).
    Nothing,
}

impl<S: Copy + Eq> Scope<S> {
    /// Evaluates the predicate against one request's relevant fields.
    #[must_use]
    pub fn permits(&self, owner: UserId, assignee: Option<UserId>, status: S) -> bool {
        match self {
            Self::All => true,
            Self::OwnedBy(user) => owner == *user,
            Self::AssignedTo(user) => assignee == Some(*user),
            Self::Statuses(statuses) => statuses.contains(&status),
            Self::Nothing => false,
        }
    }
}

/// Listing scope for capital requests, per role.
#[must_use]
pub fn capital_scope(role: Role, user: UserId) -> Scope<CapitalStatus> {
    match role {
        Role::Outlet => Scope::OwnedBy(user),
        Role::Operator => {
            Scope::Statuses(&[CapitalStatus::Pending, CapitalStatus::OperatorApproved])
        }
        Role::Finance => Scope::Statuses(&[
            CapitalStatus::OperatorApproved,
            CapitalStatus::FinanceApproved,
            CapitalStatus::Disbursed,
        ]),
        Role::Admin => Scope::All,
        // Sales and depositors play no part in capital requests.
        Role::Sales | Role::Depositor => Scope::Nothing,
    }
}

/// Listing scope for cash deposits, per role.
#[must_use]
pub fn deposit_scope(role: Role, user: UserId) -> Scope<DepositStatus> {
    match role {
        Role::Outlet => Scope::OwnedBy(user),
        Role::Sales => Scope::Statuses(&[DepositStatus::Pending, DepositStatus::SalesApproved]),
        Role::Operator => Scope::Statuses(&[
            DepositStatus::SalesApproved,
            DepositStatus::OperatorApproved,
        ]),
        Role::Finance => Scope::Statuses(&[
            DepositStatus::OperatorApproved,
            DepositStatus::FinanceApproved,
        ]),
        Role::Depositor => Scope::AssignedTo(user),
        Role::Admin => Scope::All,
    }
}
