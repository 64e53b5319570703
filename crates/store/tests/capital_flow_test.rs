//! End-to-end tests for the capital request workflow.

use rust_decimal_macros::dec;

use setora_core::request::code::CodeGenerator;
use setora_core::request::store::CapitalStore;
use setora_core::workflow::error::WorkflowError;
use setora_core::workflow::service::CapitalService;
use setora_core::workflow::types::{ActionInput, Actor, CapitalStatus};
use setora_shared::types::{Amount, Role, UserId};
use setora_store::MemoryCapitalStore;

fn actor(role: Role) -> Actor {
    Actor::new(UserId::new(), role)
}

fn create(store: &MemoryCapitalStore, outlet: UserId) -> setora_core::request::CapitalRequest {
    CapitalService::create(
        store,
        &CodeGenerator::default(),
        outlet,
        Amount::new(dec!(5000000)).unwrap(),
        "Inventory".to_string(),
    )
    .unwrap()
}

// ============================================================================
// Test: full lifecycle pending → operator_approved → finance_approved → disbursed
// ============================================================================
#[test]
fn test_full_capital_lifecycle() {
    let store = MemoryCapitalStore::new();
    let outlet = UserId::new();
    let operator = actor(Role::Operator);
    let finance = actor(Role::Finance);

    let request = create(&store, outlet);
    assert_eq!(request.status, CapitalStatus::Pending);
    assert!(request.code.starts_with("CAP-"));

    let request = CapitalService::apply_action(
        &store,
        request.id,
        &operator,
        "operator_approve",
        &ActionInput::with_notes("stock verified"),
    )
    .unwrap();
    assert_eq!(request.status, CapitalStatus::OperatorApproved);
    let operator_stage = request.operator.clone().unwrap();
    assert_eq!(operator_stage.actor, operator.id);
    assert_eq!(operator_stage.notes.as_deref(), Some("stock verified"));

    let request = CapitalService::apply_action(
        &store,
        request.id,
        &finance,
        "finance_approve",
        &ActionInput::default(),
    )
    .unwrap();
    assert_eq!(request.status, CapitalStatus::FinanceApproved);

    let request = CapitalService::apply_action(
        &store,
        request.id,
        &finance,
        "disburse",
        &ActionInput::default(),
    )
    .unwrap();
    assert_eq!(request.status, CapitalStatus::Disbursed);
    assert!(request.disbursed_at.is_some());

    // Earlier stage records are retained unchanged.
    assert_eq!(request.operator, Some(operator_stage));
    assert_eq!(request.finance.unwrap().actor, finance.id);
    assert!(request.rejected_at.is_none());

    // One version bump per committed transition.
    assert_eq!(request.version, 3);
}

// ============================================================================
// Test: wrong role leaves the stored request byte-for-byte untouched
// ============================================================================
#[test]
fn test_wrong_role_leaves_request_untouched() {
    let store = MemoryCapitalStore::new();
    let request = create(&store, UserId::new());
    let before = store.get(request.id).unwrap();

    let result = CapitalService::apply_action(
        &store,
        request.id,
        &actor(Role::Sales),
        "operator_approve",
        &ActionInput::default(),
    );
    assert!(matches!(result, Err(WorkflowError::Unauthorized { .. })));

    let after = store.get(request.id).unwrap();
    assert_eq!(after, before, "updated_at and version included");
}

// ============================================================================
// Test: unrecognized actions are an explicit error, not a silent no-op
// ============================================================================
#[test]
fn test_unknown_action_is_an_error() {
    let store = MemoryCapitalStore::new();
    let request = create(&store, UserId::new());
    let before = store.get(request.id).unwrap();

    let result = CapitalService::apply_action(
        &store,
        request.id,
        &actor(Role::Operator),
        "aprove",
        &ActionInput::default(),
    );
    match result {
        Err(WorkflowError::UnknownAction(name)) => assert_eq!(name, "aprove"),
        other => panic!("expected UnknownAction, got {other:?}"),
    }
    assert_eq!(store.get(request.id).unwrap(), before);
}

// ============================================================================
// Test: unknown request id
// ============================================================================
#[test]
fn test_unknown_request_is_not_found() {
    let store = MemoryCapitalStore::new();
    let result = CapitalService::apply_action(
        &store,
        setora_shared::types::CapitalRequestId::new(),
        &actor(Role::Operator),
        "operator_approve",
        &ActionInput::default(),
    );
    assert!(matches!(result, Err(WorkflowError::NotFound(_))));
}

// ============================================================================
// Test: racing transitions resolve to exactly one winner
// ============================================================================
#[test]
fn test_concurrent_transition_loser_sees_stale_state() {
    let store = MemoryCapitalStore::new();
    let request = create(&store, UserId::new());

    // Two actors read the same pending snapshot.
    let snapshot = store.get(request.id).unwrap();

    // The first approval commits.
    CapitalService::apply_action(
        &store,
        request.id,
        &actor(Role::Operator),
        "operator_approve",
        &ActionInput::default(),
    )
    .unwrap();

    // The second actor writes its stale snapshot and loses.
    let mut stale = snapshot;
    stale.status = CapitalStatus::OperatorApproved;
    let result = store.save(stale);
    assert!(matches!(result, Err(WorkflowError::StaleState(_))));

    // After a fresh read the same action is no longer applicable.
    let retry = CapitalService::apply_action(
        &store,
        request.id,
        &actor(Role::Operator),
        "operator_approve",
        &ActionInput::default(),
    );
    assert!(matches!(retry, Err(WorkflowError::InvalidTransition { .. })));
}

// ============================================================================
// Test: rejection terminates the workflow
// ============================================================================
#[test]
fn test_rejected_request_accepts_no_further_actions() {
    let store = MemoryCapitalStore::new();
    let request = create(&store, UserId::new());

    let request = CapitalService::apply_action(
        &store,
        request.id,
        &actor(Role::Operator),
        "reject",
        &ActionInput::with_reason("no budget this quarter"),
    )
    .unwrap();
    assert_eq!(request.status, CapitalStatus::Rejected);
    assert!(request.rejected_at.is_some());
    assert_eq!(
        request.rejection_reason.as_deref(),
        Some("no budget this quarter")
    );

    let result = CapitalService::apply_action(
        &store,
        request.id,
        &actor(Role::Finance),
        "finance_approve",
        &ActionInput::default(),
    );
    assert!(matches!(
        result,
        Err(WorkflowError::InvalidTransition { .. })
    ));
}

// ============================================================================
// Test: creation validation
// ============================================================================
#[test]
fn test_create_requires_purpose() {
    let store = MemoryCapitalStore::new();
    let result = CapitalService::create(
        &store,
        &CodeGenerator::default(),
        UserId::new(),
        Amount::new(dec!(1000)).unwrap(),
        "   ".to_string(),
    );
    assert!(matches!(result, Err(WorkflowError::Validation(_))));
}

#[test]
fn test_create_rejects_oversized_purpose() {
    let store = MemoryCapitalStore::new();
    let result = CapitalService::create(
        &store,
        &CodeGenerator::default(),
        UserId::new(),
        Amount::new(dec!(1000)).unwrap(),
        "x".repeat(1001),
    );
    assert!(matches!(result, Err(WorkflowError::Validation(_))));
}

// ============================================================================
// Test: generated codes are unique and well formed
// ============================================================================
#[test]
fn test_created_codes_are_unique_and_well_formed() {
    let store = MemoryCapitalStore::new();
    let mut codes = std::collections::HashSet::new();

    for _ in 0..200 {
        let request = create(&store, UserId::new());
        let parts: Vec<&str> = request.code.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "CAP");
        assert_eq!(parts[1].len(), 8);
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
        assert!(codes.insert(request.code), "duplicate code issued");
    }
}

// ============================================================================
// Test: per-role visibility
// ============================================================================
#[test]
fn test_capital_visibility_by_role() {
    let store = MemoryCapitalStore::new();
    let outlet_a = UserId::new();
    let outlet_b = UserId::new();

    let pending = create(&store, outlet_a);
    let approved = create(&store, outlet_b);
    CapitalService::apply_action(
        &store,
        approved.id,
        &actor(Role::Operator),
        "operator_approve",
        &ActionInput::default(),
    )
    .unwrap();

    // Outlet A sees only its own request.
    let visible = CapitalService::list(&store, &Actor::new(outlet_a, Role::Outlet));
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, pending.id);

    // The operator sees both stages it works on.
    let visible = CapitalService::list(&store, &actor(Role::Operator));
    assert_eq!(visible.len(), 2);

    // Finance only sees the operator-approved one.
    let visible = CapitalService::list(&store, &actor(Role::Finance));
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, approved.id);

    // Sales and depositors are not part of this workflow.
    assert!(CapitalService::list(&store, &actor(Role::Sales)).is_empty());
    assert!(CapitalService::list(&store, &actor(Role::Depositor)).is_empty());

    // Admin sees everything.
    assert_eq!(CapitalService::list(&store, &actor(Role::Admin)).len(), 2);
}
