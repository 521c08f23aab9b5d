//! Error types shared between the engine and its UI collaborators.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes surfaced to the frontend (which owns localization).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettleErrorCode {
    InvalidAmount,
    AmountMismatch,
    InsufficientQuantity,
    InvalidRefundQuantity,
    LineNotFound,
    InvalidDiscount,
    InvalidOperation,
}

/// Error payload returned to the UI when a settlement command is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandError {
    pub code: SettleErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: SettleErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Validation failures raised when constructing domain values.
///
/// Line creation is an upstream (ordering subsystem) concern; these are
/// the conditions it must reject before a line ever reaches the engine.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("unit price must be non-negative, got {0}")]
    NegativePrice(f64),

    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(f64),

    #[error("discount percentage must be between 0 and 100, got {0}")]
    PercentageOutOfRange(f64),

    #[error("fixed discount {amount} exceeds unit price {unit_price}")]
    DiscountExceedsPrice { amount: f64, unit_price: f64 },

    #[error("division must be a positive share count")]
    InvalidDivision,
}
