//! Monetary amount with decimal precision and range validation.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision and
//! enforces the request amount bounds at construction, so an out-of-range
//! amount is unrepresentable once a request exists.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest accepted request amount (0.01).
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest accepted request amount (999,999,999.99).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_215_752_191, 23, 0, false, 2);

/// A validated monetary amount.
///
/// Guaranteed to satisfy `MIN_AMOUNT <= amount <= MAX_AMOUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

/// Errors produced when constructing an `Amount`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The amount is below the accepted minimum.
    #[error("Amount {0} is below the minimum of {MIN_AMOUNT}")]
    TooSmall(Decimal),

    /// The amount exceeds the accepted maximum.
    #[error("Amount {0} exceeds the maximum of {MAX_AMOUNT}")]
    TooLarge(Decimal),
}

impl Amount {
    /// Creates a validated amount.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value < MIN_AMOUNT {
            return Err(AmountError::TooSmall(value));
        }
        if value > MAX_AMOUNT {
            return Err(AmountError::TooLarge(value));
        }
        Ok(Self(value))
    }

    /// Returns the inner decimal value.
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
