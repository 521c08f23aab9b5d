//! Engine errors and their mapping to UI-facing error codes.

use shared::error::{CommandError, SettleErrorCode};
use thiserror::Error;

/// Errors raised by settlement operations.
///
/// All computation in the engine is pure and synchronous; errors are
/// returned at the point of violation, never deferred or retried.
#[derive(Debug, Error, PartialEq)]
pub enum SettleError {
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Entered amount {entered:.2} does not match selected total {selected:.2}")]
    AmountMismatch { entered: f64, selected: f64 },

    #[error("Insufficient unpaid quantity on line {0}")]
    InsufficientQuantity(String),

    #[error("Invalid refund quantity: requested {requested}, paid {paid}")]
    InvalidRefundQuantity { requested: f64, paid: f64 },

    #[error("Order line not found: {0}")]
    LineNotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl From<SettleError> for CommandError {
    fn from(err: SettleError) -> Self {
        let code = match &err {
            SettleError::InvalidAmount => SettleErrorCode::InvalidAmount,
            SettleError::AmountMismatch { .. } => SettleErrorCode::AmountMismatch,
            SettleError::InsufficientQuantity(_) => SettleErrorCode::InsufficientQuantity,
            SettleError::InvalidRefundQuantity { .. } => SettleErrorCode::InvalidRefundQuantity,
            SettleError::LineNotFound(_) => SettleErrorCode::LineNotFound,
            SettleError::InvalidOperation(_) => SettleErrorCode::InvalidOperation,
        };
        CommandError::new(code, err.to_string())
    }
}
