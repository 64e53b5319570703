//! Core business logic for Setora.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, transition rules, and derived views
//! live here.
//!
//! # Modules
//!
//! - `request` - Request entities, code generation, and persistence ports
//! - `workflow` - The approval state machines and orchestration services

pub mod request;
pub mod workflow;
