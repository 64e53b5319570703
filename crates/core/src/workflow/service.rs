//! Orchestration services over the transition engine.
//!
//! Each operation is a read/validate/write sequence against the store
//! ports: parse the action, load the request, run the engine, apply the
//! event, save. Nothing is written when validation fails, so an error
//! leaves the persisted request untouched.

use chrono::Utc;

use setora_shared::types::{Amount, CapitalRequestId, CashDepositId, Role, UserId};

use crate::request::code::{CAPITAL_PREFIX, CodeGenerator, DEPOSIT_PREFIX};
use crate::request::store::{CapitalStore, DepositStore, UserDirectory};
use crate::request::types::{CapitalRequest, CashDeposit};
use crate::workflow::assignment::AssignmentStrategy;
use crate::workflow::engine::{CapitalEngine, DepositEngine};
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{ActionInput, Actor, CapitalAction, DepositAction};
use crate::workflow::visibility::{capital_scope, deposit_scope};

/// Longest accepted purpose or description text.
pub const MAX_TEXT_LEN: usize = 1000;

fn validate_text(value: &str, field: &str) -> Result<(), WorkflowError> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(WorkflowError::Validation(format!(
            "{field} cannot exceed {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Stateless service for the capital request workflow.
pub struct CapitalService;

impl CapitalService {
    /// Creates a pending capital request with a freshly generated code.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank or oversized purpose,
    /// `CodePoolExhausted` or `DuplicateCode` from code allocation.
    pub fn create(
        store: &impl CapitalStore,
        generator: &CodeGenerator,
        outlet: UserId,
        amount: Amount,
        purpose: String,
    ) -> Result<CapitalRequest, WorkflowError> {
        if purpose.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "purpose is required".to_string(),
            ));
        }
        validate_text(&purpose, "purpose")?;

        let now = Utc::now();
        let code = generator.generate(
            CAPITAL_PREFIX,
            now.date_naive(),
            &mut rand::rng(),
            |candidate| store.exists_with_code(candidate),
        )?;
        let request =
            CapitalRequest::new(CapitalRequestId::new(), code, outlet, amount, purpose, now);
        store.insert(request.clone())?;
        Ok(request)
    }

    /// Validates and applies a requested action to a stored request.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAction`, `Unauthorized`, `InvalidTransition`,
    /// `RejectionReasonRequired`, `NotFound`, or `StaleState`; the stored
    /// request is unmodified on any error.
    pub fn apply_action(
        store: &impl CapitalStore,
        id: CapitalRequestId,
        actor: &Actor,
        action: &str,
        input: &ActionInput,
    ) -> Result<CapitalRequest, WorkflowError> {
        let action = CapitalAction::parse(action)
            .ok_or_else(|| WorkflowError::UnknownAction(action.to_string()))?;
        let mut request = store.get(id)?;
        let event = CapitalEngine::transition(request.status, actor, action, input)?;
        request.apply(event);
        store.save(request)
    }

    /// Lists the requests visible to the actor's role.
    pub fn list(store: &impl CapitalStore, actor: &Actor) -> Vec<CapitalRequest> {
        store.query(&capital_scope(actor.role, actor.id))
    }
}

/// Stateless service for the cash deposit workflow.
pub struct DepositService;

impl DepositService {
    /// Creates a pending cash deposit with a freshly generated code.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an oversized description,
    /// `CodePoolExhausted` or `DuplicateCode` from code allocation.
    pub fn create(
        store: &impl DepositStore,
        generator: &CodeGenerator,
        outlet: UserId,
        amount: Amount,
        description: Option<String>,
    ) -> Result<CashDeposit, WorkflowError> {
        if let Some(text) = &description {
            validate_text(text, "description")?;
        }

        let now = Utc::now();
        let code = generator.generate(
            DEPOSIT_PREFIX,
            now.date_naive(),
            &mut rand::rng(),
            |candidate| store.exists_with_code(candidate),
        )?;
        let deposit =
            CashDeposit::new(CashDepositId::new(), code, outlet, amount, description, now);
        store.insert(deposit.clone())?;
        Ok(deposit)
    }

    /// Validates and applies a requested action to a stored deposit.
    ///
    /// Operator approval additionally assigns a depositor: a random active
    /// user with the depositor role, or none when no one is eligible.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAction`, `Unauthorized`, `InvalidTransition`,
    /// `RejectionReasonRequired`, `NotFound`, or `StaleState`; the stored
    /// deposit is unmodified on any error.
    pub fn apply_action(
        store: &impl DepositStore,
        directory: &impl UserDirectory,
        strategy: &impl AssignmentStrategy,
        id: CashDepositId,
        actor: &Actor,
        action: &str,
        input: &ActionInput,
    ) -> Result<CashDeposit, WorkflowError> {
        let action = DepositAction::parse(action)
            .ok_or_else(|| WorkflowError::UnknownAction(action.to_string()))?;
        let mut deposit = store.get(id)?;
        let event = DepositEngine::transition(deposit.status, actor, action, input, || {
            strategy.select(&directory.active_with_role(Role::Depositor))
        })?;
        deposit.apply(event);
        store.save(deposit)
    }

    /// Lists the deposits visible to the actor's role.
    pub fn list(store: &impl DepositStore, actor: &Actor) -> Vec<CashDeposit> {
        store.query(&deposit_scope(actor.role, actor.id))
    }
}
