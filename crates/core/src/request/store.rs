//! Persistence ports consumed by the workflow services.
//!
//! The engine itself is a pure function; these traits are the seams to the
//! store and the user directory. `save` must be atomic per request and
//! version-checked: when two transitions race, at most one commits and the
//! loser sees `StaleState`.

use setora_shared::types::{CapitalRequestId, CashDepositId, Role, UserId};

use crate::request::types::{CapitalRequest, CashDeposit};
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{CapitalStatus, DepositStatus};
use crate::workflow::visibility::Scope;

/// Durable storage for capital requests.
pub trait CapitalStore {
    /// Persists a freshly created request.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode` if the code is already taken.
    fn insert(&self, request: CapitalRequest) -> Result<(), WorkflowError>;

    /// Loads a request by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    fn get(&self, id: CapitalRequestId) -> Result<CapitalRequest, WorkflowError>;

    /// Persists a mutated request, checking its version, and returns the
    /// stored copy with the version bumped.
    ///
    /// # Errors
    ///
    /// Returns `StaleState` on a version mismatch, `NotFound` for an
    /// unknown id.
    fn save(&self, request: CapitalRequest) -> Result<CapitalRequest, WorkflowError>;

    /// Reports whether any request carries this code.
    fn exists_with_code(&self, code: &str) -> bool;

    /// Lists the requests permitted by a visibility scope.
    fn query(&self, scope: &Scope<CapitalStatus>) -> Vec<CapitalRequest>;
}

/// Durable storage for cash deposits.
pub trait DepositStore {
    /// Persists a freshly created deposit.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode` if the code is already taken.
    fn insert(&self, deposit: CashDeposit) -> Result<(), WorkflowError>;

    /// Loads a deposit by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    fn get(&self, id: CashDepositId) -> Result<CashDeposit, WorkflowError>;

    /// Persists a mutated deposit, checking its version, and returns the
    /// stored copy with the version bumped.
    ///
    /// # Errors
    ///
    /// Returns `StaleState` on a version mismatch, `NotFound` for an
    /// unknown id.
    fn save(&self, deposit: CashDeposit) -> Result<CashDeposit, WorkflowError>;

    /// Reports whether any deposit carries this code.
    fn exists_with_code(&self, code: &str) -> bool;

    /// Lists the deposits permitted by a visibility scope.
    fn query(&self, scope: &Scope<DepositStatus>) -> Vec<CashDeposit>;
}

/// Read access to the user base, for depositor assignment.
pub trait UserDirectory {
    /// Returns the ids of all active users holding `role`.
    fn active_with_role(&self, role: Role) -> Vec<UserId>;
}
