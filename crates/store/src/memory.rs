//! Concurrent in-memory stores.
//!
//! Each store keeps its rows in a `DashMap` keyed by the surrogate id.
//! `save` holds the entry lock while comparing versions, so two racing
//! transitions on one request cannot both commit; the loser receives
//! `StaleState` and must re-read. Codes are reserved through a `DashSet`
//! before a row is written, so two racing inserts with the same code
//! resolve to exactly one winner; this is the backstop behind the
//! generator's check-and-retry.

use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use uuid::Uuid;

use setora_core::request::store::{CapitalStore, DepositStore, UserDirectory};
use setora_core::request::types::{CapitalRequest, CashDeposit};
use setora_core::workflow::error::WorkflowError;
use setora_core::workflow::types::{CapitalStatus, DepositStatus};
use setora_core::workflow::visibility::Scope;
use setora_shared::types::{CapitalRequestId, CashDepositId, Role, UserId};

/// In-memory capital request store.
#[derive(Debug, Default)]
pub struct MemoryCapitalStore {
    rows: DashMap<Uuid, CapitalRequest>,
    codes: DashSet<String>,
}

impl MemoryCapitalStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CapitalStore for MemoryCapitalStore {
    fn insert(&self, request: CapitalRequest) -> Result<(), WorkflowError> {
        // The code set is the serialization point: reserve before writing
        // the row, so racing inserts with one code commit exactly once.
        if !self.codes.insert(request.code.clone()) {
            return Err(WorkflowError::DuplicateCode(request.code));
        }
        tracing::debug!(id = %request.id, code = %request.code, "inserting capital request");
        self.rows.insert(request.id.into_inner(), request);
        Ok(())
    }

    fn get(&self, id: CapitalRequestId) -> Result<CapitalRequest, WorkflowError> {
        self.rows
            .get(&id.into_inner())
            .map(|row| row.clone())
            .ok_or(WorkflowError::NotFound(id.into_inner()))
    }

    fn save(&self, request: CapitalRequest) -> Result<CapitalRequest, WorkflowError> {
        match self.rows.entry(request.id.into_inner()) {
            Entry::Occupied(mut entry) => {
                if entry.get().version != request.version {
                    return Err(WorkflowError::StaleState(request.id.into_inner()));
                }
                let mut stored = request;
                stored.version += 1;
                tracing::debug!(
                    id = %stored.id,
                    status = %stored.status,
                    version = stored.version,
                    "saving capital request"
                );
                entry.insert(stored.clone());
                Ok(stored)
            }
            Entry::Vacant(_) => Err(WorkflowError::NotFound(request.id.into_inner())),
        }
    }

    fn exists_with_code(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    fn query(&self, scope: &Scope<CapitalStatus>) -> Vec<CapitalRequest> {
        let mut rows: Vec<CapitalRequest> = self
            .rows
            .iter()
            .filter(|row| scope.permits(row.outlet, None, row.status))
            .map(|row| row.clone())
            .collect();
        // Newest first, matching the listing order users expect.
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}

/// In-memory cash deposit store.
#[derive(Debug, Default)]
pub struct MemoryDepositStore {
    rows: DashMap<Uuid, CashDeposit>,
    codes: DashSet<String>,
}

impl MemoryDepositStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DepositStore for MemoryDepositStore {
    fn insert(&self, deposit: CashDeposit) -> Result<(), WorkflowError> {
        // The code set is the serialization point: reserve before writing
        // the row, so racing inserts with one code commit exactly once.
        if !self.codes.insert(deposit.code.clone()) {
            return Err(WorkflowError::DuplicateCode(deposit.code));
        }
        tracing::debug!(id = %deposit.id, code = %deposit.code, "inserting cash deposit");
        self.rows.insert(deposit.id.into_inner(), deposit);
        Ok(())
    }

    fn get(&self, id: CashDepositId) -> Result<CashDeposit, WorkflowError> {
        self.rows
            .get(&id.into_inner())
            .map(|row| row.clone())
            .ok_or(WorkflowError::NotFound(id.into_inner()))
    }

    fn save(&self, deposit: CashDeposit) -> Result<CashDeposit, WorkflowError> {
        match self.rows.entry(deposit.id.into_inner()) {
            Entry::Occupied(mut entry) => {
                if entry.get().version != deposit.version {
                    return Err(WorkflowError::StaleState(deposit.id.into_inner()));
                }
                let mut stored = deposit;
                stored.version += 1;
                tracing::debug!(
                    id = %stored.id,
                    status = %stored.status,
                    version = stored.version,
                    "saving cash deposit"
                );
                entry.insert(stored.clone());
                Ok(stored)
            }
            Entry::Vacant(_) => Err(WorkflowError::NotFound(deposit.id.into_inner())),
        }
    }

    fn exists_with_code(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    fn query(&self, scope: &Scope<DepositStatus>) -> Vec<CashDeposit> {
        let mut rows: Vec<CashDeposit> = self
            .rows
            .iter()
            .filter(|row| scope.permits(row.outlet, row.depositor, row.status))
            .map(|row| row.clone())
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}

/// One entry in the user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryUser {
    /// The user's id.
    pub id: UserId,
    /// The user's role.
    pub role: Role,
    /// Whether the user may receive assignments.
    pub active: bool,
}

/// In-memory user directory.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    users: DashMap<Uuid, DirectoryUser>,
}

impl MemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user, returning its id.
    pub fn add(&self, role: Role, active: bool) -> UserId {
        let id = UserId::new();
        self.users
            .insert(id.into_inner(), DirectoryUser { id, role, active });
        id
    }

    /// Deactivates a user. Unknown ids are ignored.
    pub fn deactivate(&self, id: UserId) {
        if let Some(mut user) = self.users.get_mut(&id.into_inner()) {
            user.active = false;
        }
    }
}

impl UserDirectory for MemoryUserDirectory {
    fn active_with_role(&self, role: Role) -> Vec<UserId> {
        self.users
            .iter()
            .filter(|user| user.role == role && user.active)
            .map(|user| user.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use setora_shared::types::{Amount, CapitalRequestId};

    fn request(code: &str) -> CapitalRequest {
        CapitalRequest::new(
            CapitalRequestId::new(),
            code.to_string(),
            UserId::new(),
            Amount::new(dec!(100000)).unwrap(),
            "Restock".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn test_insert_and_get() {
        let store = MemoryCapitalStore::new();
        let req = request("CAP-20260830-0001");
        store.insert(req.clone()).unwrap();
        assert_eq!(store.get(req.id).unwrap(), req);
        assert!(store.exists_with_code("CAP-20260830-0001"));
        assert!(!store.exists_with_code("CAP-20260830-0002"));
    }

    #[test]
    fn test_insert_duplicate_code_is_rejected() {
        let store = MemoryCapitalStore::new();
        store.insert(request("CAP-20260830-0007")).unwrap();
        let result = store.insert(request("CAP-20260830-0007"));
        assert!(matches!(result, Err(WorkflowError::DuplicateCode(_))));
    }

    #[test]
    fn test_racing_inserts_with_same_code_commit_once() {
        use std::sync::{Arc, Barrier};

        let store = Arc::new(MemoryCapitalStore::new());
        for round in 0..200 {
            let code = format!("CAP-20260830-{round:04}");
            let barrier = Arc::new(Barrier::new(2));
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let store = Arc::clone(&store);
                    let barrier = Arc::clone(&barrier);
                    let req = request(&code);
                    std::thread::spawn(move || {
                        barrier.wait();
                        store.insert(req).is_ok()
                    })
                })
                .collect();

            let committed = handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .filter(|committed| *committed)
                .count();
            assert_eq!(committed, 1, "code {code} must be stored exactly once");
        }

        let stored = store.query(&Scope::All);
        assert_eq!(stored.len(), 200);
    }

    #[test]
    fn test_get_unknown_id_is_not_found() {
        let store = MemoryCapitalStore::new();
        let result = store.get(CapitalRequestId::new());
        assert!(matches!(result, Err(WorkflowError::NotFound(_))));
    }

    #[test]
    fn test_save_bumps_version() {
        let store = MemoryCapitalStore::new();
        let req = request("CAP-20260830-0003");
        store.insert(req.clone()).unwrap();

        let saved = store.save(req).unwrap();
        assert_eq!(saved.version, 1);
        assert_eq!(store.get(saved.id).unwrap().version, 1);
    }

    #[test]
    fn test_save_stale_version_is_rejected() {
        let store = MemoryCapitalStore::new();
        let req = request("CAP-20260830-0004");
        store.insert(req.clone()).unwrap();

        let stale = req.clone(); // version 0
        store.save(req).unwrap(); // store now at version 1

        let result = store.save(stale);
        assert!(matches!(result, Err(WorkflowError::StaleState(_))));
    }

    #[test]
    fn test_save_unknown_id_is_not_found() {
        let store = MemoryCapitalStore::new();
        let result = store.save(request("CAP-20260830-0005"));
        assert!(matches!(result, Err(WorkflowError::NotFound(_))));
    }

    #[test]
    fn test_directory_filters_role_and_active() {
        let directory = MemoryUserDirectory::new();
        let active = directory.add(Role::Depositor, true);
        let inactive = directory.add(Role::Depositor, false);
        directory.add(Role::Sales, true);

        let eligible = directory.active_with_role(Role::Depositor);
        assert_eq!(eligible, vec![active]);
        assert!(!eligible.contains(&inactive));

        directory.deactivate(active);
        assert!(directory.active_with_role(Role::Depositor).is_empty());
    }
}
