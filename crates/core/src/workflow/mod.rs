//! Approval workflow management for Setora.
//!
//! This module implements the two approval state machines, depositor
//! assignment, visibility scoping, and the orchestration services.
//!
//! # Modules
//!
//! - `types` - Statuses, actions, and transition events per workflow
//! - `error` - Workflow-specific error types
//! - `engine` - Data-driven transition rule tables and lookup
//! - `assignment` - Depositor selection strategies
//! - `visibility` - Read-side listing scopes per role
//! - `service` - Create/apply/list orchestration over the store ports

pub mod assignment;
pub mod engine;
pub mod error;
pub mod service;
pub mod types;
pub mod visibility;

#[cfg(test)]
mod engine_props;

pub use assignment::{AssignmentStrategy, RandomAssignment};
pub use engine::{CAPITAL_RULES, CapitalEngine, DEPOSIT_RULES, DepositEngine, TransitionRule};
pub use error::WorkflowError;
pub use service::{CapitalService, DepositService};
pub use types::{
    ActionInput, Actor, CapitalAction, CapitalEvent, CapitalStatus, DepositAction, DepositEvent,
    DepositStatus,
};
pub use visibility::{Scope, capital_scope, deposit_scope};
