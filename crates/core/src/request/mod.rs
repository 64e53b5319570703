//! Request entities, code generation, and persistence ports.

pub mod code;
pub mod store;
pub mod types;

pub use code::{CAPITAL_PREFIX, CodeGenerator, DEPOSIT_PREFIX};
pub use store::{CapitalStore, DepositStore, UserDirectory};
pub use types::{CapitalRequest, CashDeposit, StageRecord};
