//! The workflow transition engine.
//!
//! Transitions are declared as data: one rule table per workflow, each row
//! binding (current status, action) to the allowed roles and the next
//! status. Validation order is fixed: the actor's role is checked first
//! (`Unauthorized`), then the current status (`InvalidTransition`). A
//! successful lookup yields an event carrying the audit data to stamp.

use chrono::Utc;
use std::fmt;

use setora_shared::types::{Role, UserId};

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{
    ActionInput, Actor, CapitalAction, CapitalEvent, CapitalStatus, DepositAction, DepositEvent,
    DepositStatus,
};

/// One row of a workflow's transition table.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRule<S: 'static, A: 'static> {
    /// Status the request must currently be in.
    pub from: S,
    /// The requested action.
    pub action: A,
    /// Roles permitted to perform the action.
    pub roles: &'static [Role],
    /// Status the request moves to.
    pub to: S,
}

/// Transition table for capital requests.
pub const CAPITAL_RULES: &[TransitionRule<CapitalStatus, CapitalAction>] = &[
    TransitionRule {
        from: CapitalStatus::Pending,
        action: CapitalAction::OperatorApprove,
        roles: &[Role::Operator],
        to: CapitalStatus::OperatorApproved,
    },
    TransitionRule {
        from: CapitalStatus::OperatorApproved,
        action: CapitalAction::FinanceApprove,
        roles: &[Role::Finance],
        to: CapitalStatus::FinanceApproved,
    },
    TransitionRule {
        from: CapitalStatus::FinanceApproved,
        action: CapitalAction::Disburse,
        roles: &[Role::Finance],
        to: CapitalStatus::Disbursed,
    },
    TransitionRule {
        from: CapitalStatus::Pending,
        action: CapitalAction::Reject,
        roles: &[Role::Operator, Role::Finance],
        to: CapitalStatus::Rejected,
    },
    TransitionRule {
        from: CapitalStatus::OperatorApproved,
        action: CapitalAction::Reject,
        roles: &[Role::Operator, Role::Finance],
        to: CapitalStatus::Rejected,
    },
];

/// Transition table for cash deposits.
pub const DEPOSIT_RULES: &[TransitionRule<DepositStatus, DepositAction>] = &[
    TransitionRule {
        from: DepositStatus::Pending,
        action: DepositAction::SalesApprove,
        roles: &[Role::Sales],
        to: DepositStatus::SalesApproved,
    },
    TransitionRule {
        from: DepositStatus::SalesApproved,
        action: DepositAction::OperatorApprove,
        roles: &[Role::Operator],
        to: DepositStatus::OperatorApproved,
    },
    TransitionRule {
        from: DepositStatus::OperatorApproved,
        action: DepositAction::FinanceApprove,
        roles: &[Role::Finance],
        to: DepositStatus::FinanceApproved,
    },
    TransitionRule {
        from: DepositStatus::Pending,
        action: DepositAction::Reject,
        roles: &[Role::Sales, Role::Operator, Role::Finance],
        to: DepositStatus::Rejected,
    },
    TransitionRule {
        from: DepositStatus::SalesApproved,
        action: DepositAction::Reject,
        roles: &[Role::Sales, Role::Operator, Role::Finance],
        to: DepositStatus::Rejected,
    },
    TransitionRule {
        from: DepositStatus::OperatorApproved,
        action: DepositAction::Reject,
        roles: &[Role::Sales, Role::Operator, Role::Finance],
        to: DepositStatus::Rejected,
    },
];

/// Looks up the next status for (current, role, action) in a rule table.
///
/// Role is validated before status: a caller holding the wrong role gets
/// `Unauthorized` even when the status would also have been wrong.
pub fn resolve<S, A>(
    rules: &[TransitionRule<S, A>],
    current: S,
    role: Role,
    action: A,
) -> Result<S, WorkflowError>
where
    S: Copy + Eq + fmt::Display,
    A: Copy + Eq + fmt::Display,
{
    let allowed = rules
        .iter()
        .filter(|rule| rule.action == action)
        .any(|rule| rule.roles.contains(&role));
    if !allowed {
        return Err(WorkflowError::Unauthorized {
            role,
            action: action.to_string(),
        });
    }

    rules
        .iter()
        .find(|rule| rule.action == action && rule.from == current)
        .map(|rule| rule.to)
        .ok_or_else(|| WorkflowError::InvalidTransition {
            action: action.to_string(),
            status: current.to_string(),
        })
}

fn required_reason(input: &ActionInput) -> Result<String, WorkflowError> {
    match &input.reason {
        Some(reason) if !reason.trim().is_empty() => Ok(reason.clone()),
        _ => Err(WorkflowError::RejectionReasonRequired),
    }
}

/// Stateless transition engine for capital requests.
pub struct CapitalEngine;

impl CapitalEngine {
    /// Validates an action against the rule table and builds the event.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` if the role may never perform the action
    /// * `InvalidTransition` if the action does not apply to `current`
    /// * `RejectionReasonRequired` for a reject without a non-blank reason
    pub fn transition(
        current: CapitalStatus,
        actor: &Actor,
        action: CapitalAction,
        input: &ActionInput,
    ) -> Result<CapitalEvent, WorkflowError> {
        let next = resolve(CAPITAL_RULES, current, actor.role, action)?;
        let at = Utc::now();

        let event = match action {
            CapitalAction::OperatorApprove => CapitalEvent::OperatorApproved {
                actor: actor.id,
                at,
                notes: input.notes.clone(),
            },
            CapitalAction::FinanceApprove => CapitalEvent::FinanceApproved {
                actor: actor.id,
                at,
                notes: input.notes.clone(),
            },
            CapitalAction::Disburse => CapitalEvent::Disbursed { at },
            CapitalAction::Reject => CapitalEvent::Rejected {
                at,
                reason: required_reason(input)?,
            },
        };
        debug_assert_eq!(event.new_status(), next);
        Ok(event)
    }
}

/// Stateless transition engine for cash deposits.
pub struct DepositEngine;

impl DepositEngine {
    /// Validates an action against the rule table and builds the event.
    ///
    /// `select_depositor` is invoked only when the operator-approval
    /// transition has been validated; it may return `None` when no eligible
    /// depositor exists, which still succeeds with an unassigned deposit.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` if the role may never perform the action
    /// * `InvalidTransition` if the action does not apply to `current`
    /// * `RejectionReasonRequired` for a reject without a non-blank reason
    pub fn transition(
        current: DepositStatus,
        actor: &Actor,
        action: DepositAction,
        input: &ActionInput,
        select_depositor: impl FnOnce() -> Option<UserId>,
    ) -> Result<DepositEvent, WorkflowError> {
        let next = resolve(DEPOSIT_RULES, current, actor.role, action)?;
        let at = Utc::now();

        let event = match action {
            DepositAction::SalesApprove => DepositEvent::SalesApproved {
                actor: actor.id,
                at,
                notes: input.notes.clone(),
            },
            DepositAction::OperatorApprove => DepositEvent::OperatorApproved {
                actor: actor.id,
                at,
                notes: input.notes.clone(),
                depositor: select_depositor(),
            },
            DepositAction::FinanceApprove => DepositEvent::FinanceApproved {
                actor: actor.id,
                at,
                notes: input.notes.clone(),
            },
            DepositAction::Reject => DepositEvent::Rejected {
                at,
                reason: required_reason(input)?,
            },
        };
        debug_assert_eq!(event.new_status(), next);
        Ok(event)
    }
}
