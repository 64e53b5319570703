//! Human-readable request code generation.
//!
//! Codes take the form `<PREFIX>-<YYYYMMDD>-<NNNN>` with NNNN a random
//! number in 1..=9999. Candidates are checked against the store and
//! regenerated on collision; the retry loop is bounded so a saturated
//! daily pool fails loudly instead of spinning forever.

use chrono::NaiveDate;
use rand::Rng;

use setora_shared::config::CodeConfig;

use crate::workflow::error::WorkflowError;

/// Code prefix for capital requests.
pub const CAPITAL_PREFIX: &str = "CAP";

/// Code prefix for cash deposits.
pub const DEPOSIT_PREFIX: &str = "DEP";

/// Default bound on candidate codes tried per generation.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100_000;

/// Collision-checked request code generator.
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator {
    max_attempts: u32,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl CodeGenerator {
    /// Creates a generator with an explicit attempt bound.
    #[must_use]
    pub const fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Creates a generator from the loaded configuration.
    #[must_use]
    pub const fn from_config(config: &CodeConfig) -> Self {
        Self::new(config.max_attempts)
    }

    /// Generates a code unique among existing codes at the instant of check.
    ///
    /// `taken` reports whether a candidate already exists in the store. A
    /// concurrent-creation race is still possible between check and insert;
    /// the store's duplicate-code rejection is the backstop.
    ///
    /// # Errors
    ///
    /// Returns `CodePoolExhausted` when no free candidate was found within
    /// the attempt bound.
    pub fn generate(
        &self,
        prefix: &'static str,
        date: NaiveDate,
        rng: &mut impl Rng,
        mut taken: impl FnMut(&str) -> bool,
    ) -> Result<String, WorkflowError> {
        let day = date.format("%Y%m%d");
        for _ in 0..self.max_attempts {
            let number: u16 = rng.random_range(1..=9999);
            let code = format!("{prefix}-{day}-{number:04}");
            if !taken(&code) {
                return Ok(code);
            }
        }
        Err(WorkflowError::CodePoolExhausted {
            prefix,
            attempts: self.max_attempts,
        })
    }
}
