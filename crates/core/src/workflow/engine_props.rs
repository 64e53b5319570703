//! Property-based tests for the transition engine.
//!
//! These check the engine against its own rule tables across randomized
//! (status, role, action) combinations: every accepted transition matches
//! a table row exactly, and nothing outside the tables ever succeeds.

use proptest::prelude::*;

use setora_shared::types::{Role, UserId};

use crate::workflow::engine::{CAPITAL_RULES, CapitalEngine, DEPOSIT_RULES, DepositEngine};
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{
    ActionInput, Actor, CapitalAction, CapitalStatus, DepositAction, DepositStatus,
};

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Outlet),
        Just(Role::Sales),
        Just(Role::Operator),
        Just(Role::Depositor),
        Just(Role::Finance),
        Just(Role::Admin),
    ]
}

fn arb_capital_status() -> impl Strategy<Value = CapitalStatus> {
    prop_oneof![
        Just(CapitalStatus::Pending),
        Just(CapitalStatus::OperatorApproved),
        Just(CapitalStatus::FinanceApproved),
        Just(CapitalStatus::Disbursed),
        Just(CapitalStatus::Rejected),
    ]
}

fn arb_capital_action() -> impl Strategy<Value = CapitalAction> {
    prop_oneof![
        Just(CapitalAction::OperatorApprove),
        Just(CapitalAction::FinanceApprove),
        Just(CapitalAction::Disburse),
        Just(CapitalAction::Reject),
    ]
}

fn arb_deposit_status() -> impl Strategy<Value = DepositStatus> {
    prop_oneof![
        Just(DepositStatus::Pending),
        Just(DepositStatus::SalesApproved),
        Just(DepositStatus::OperatorApproved),
        Just(DepositStatus::FinanceApproved),
        Just(DepositStatus::Rejected),
    ]
}

fn arb_deposit_action() -> impl Strategy<Value = DepositAction> {
    prop_oneof![
        Just(DepositAction::SalesApprove),
        Just(DepositAction::OperatorApprove),
        Just(DepositAction::FinanceApprove),
        Just(DepositAction::Reject),
    ]
}

fn input_for(action_is_reject: bool) -> ActionInput {
    if action_is_reject {
        ActionInput::with_reason("documented discrepancy")
    } else {
        ActionInput::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// A capital transition succeeds iff the rule table has a matching row,
    /// and the produced event lands exactly on that row's target status.
    #[test]
    fn prop_capital_engine_agrees_with_table(
        status in arb_capital_status(),
        role in arb_role(),
        action in arb_capital_action(),
    ) {
        let actor = Actor::new(UserId::new(), role);
        let input = input_for(action == CapitalAction::Reject);
        let result = CapitalEngine::transition(status, &actor, action, &input);

        let row = CAPITAL_RULES
            .iter()
            .find(|r| r.action == action && r.from == status && r.roles.contains(&role));

        match (result, row) {
            (Ok(event), Some(rule)) => prop_assert_eq!(event.new_status(), rule.to),
            (Err(err), None) => {
                let role_known = CAPITAL_RULES
                    .iter()
                    .any(|r| r.action == action && r.roles.contains(&role));
                if role_known {
                    prop_assert!(
                        matches!(err, WorkflowError::InvalidTransition { .. }),
                        "expected InvalidTransition, got {err}"
                    );
                } else {
                    prop_assert!(
                        matches!(err, WorkflowError::Unauthorized { .. }),
                        "expected Unauthorized, got {err}"
                    );
                }
            }
            (Ok(_), None) => prop_assert!(false, "engine accepted a transition outside the table"),
            (Err(err), Some(_)) => {
                prop_assert!(false, "engine rejected a table transition: {err}");
            }
        }
    }

    /// A deposit transition succeeds iff the rule table has a matching row.
    #[test]
    fn prop_deposit_engine_agrees_with_table(
        status in arb_deposit_status(),
        role in arb_role(),
        action in arb_deposit_action(),
    ) {
        let actor = Actor::new(UserId::new(), role);
        let input = input_for(action == DepositAction::Reject);
        let result = DepositEngine::transition(status, &actor, action, &input, || None);

        let row = DEPOSIT_RULES
            .iter()
            .find(|r| r.action == action && r.from == status && r.roles.contains(&role));

        match (result, row) {
            (Ok(event), Some(rule)) => prop_assert_eq!(event.new_status(), rule.to),
            (Err(err), None) => {
                let role_known = DEPOSIT_RULES
                    .iter()
                    .any(|r| r.action == action && r.roles.contains(&role));
                if role_known {
                    prop_assert!(
                        matches!(err, WorkflowError::InvalidTransition { .. }),
                        "expected InvalidTransition, got {err}"
                    );
                } else {
                    prop_assert!(
                        matches!(err, WorkflowError::Unauthorized { .. }),
                        "expected Unauthorized, got {err}"
                    );
                }
            }
            (Ok(_), None) => prop_assert!(false, "engine accepted a transition outside the table"),
            (Err(err), Some(_)) => {
                prop_assert!(false, "engine rejected a table transition: {err}");
            }
        }
    }

    /// Terminal statuses admit no transition at all.
    #[test]
    fn prop_terminal_capital_statuses_are_final(
        role in arb_role(),
        action in arb_capital_action(),
    ) {
        for status in [CapitalStatus::Disbursed, CapitalStatus::Rejected] {
            let actor = Actor::new(UserId::new(), role);
            let input = input_for(action == CapitalAction::Reject);
            let result = CapitalEngine::transition(status, &actor, action, &input);
            prop_assert!(result.is_err(), "{status} must not transition via {action}");
        }
    }

    /// Terminal deposit statuses admit no transition at all.
    #[test]
    fn prop_terminal_deposit_statuses_are_final(
        role in arb_role(),
        action in arb_deposit_action(),
    ) {
        for status in [DepositStatus::FinanceApproved, DepositStatus::Rejected] {
            let actor = Actor::new(UserId::new(), role);
            let input = input_for(action == DepositAction::Reject);
            let result = DepositEngine::transition(status, &actor, action, &input, || None);
            prop_assert!(result.is_err(), "{status} must not transition via {action}");
        }
    }

    /// A blank rejection reason never rejects, regardless of role/status.
    #[test]
    fn prop_blank_reason_never_rejects(
        status in arb_capital_status(),
        role in arb_role(),
        blank in "[ \t]{0,8}",
    ) {
        let actor = Actor::new(UserId::new(), role);
        let input = ActionInput { notes: None, reason: Some(blank) };
        let result = CapitalEngine::transition(status, &actor, CapitalAction::Reject, &input);
        prop_assert!(result.is_err());
    }
}
