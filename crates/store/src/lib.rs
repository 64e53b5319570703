//! In-memory repositories for Setora.
//!
//! This crate implements the persistence ports defined in `setora-core`
//! with concurrent keyed maps. Saves are compare-and-swap on the entity
//! version, so racing transitions on the same request resolve to exactly
//! one winner.

pub mod memory;

pub use memory::{DirectoryUser, MemoryCapitalStore, MemoryDepositStore, MemoryUserDirectory};
