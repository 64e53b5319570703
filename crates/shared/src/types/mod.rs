//! Common types used across the application.

pub mod amount;
pub mod id;
pub mod role;

pub use amount::{Amount, AmountError};
pub use id::*;
pub use role::Role;
