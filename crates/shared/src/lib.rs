//! Shared types and configuration for Setora.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - The validated `Amount` money type
//! - The closed `Role` enumeration
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
