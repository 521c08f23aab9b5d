//! Collection records emitted by the settlement engine.
//!
//! A `CollectionRecord` is immutable once created. It is handed to the
//! collection/reporting collaborator for persistence; the engine never
//! retries failed submissions.

use serde::{Deserialize, Serialize};

/// Payment methods the back office accepts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    BankTransfer,
}

/// Whether a record adds to or reverses the day's collections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionKind {
    #[default]
    Payment,
    /// Negative-amount reversal so daily totals net out
    Refund,
}

/// Paid-quantity delta against a single order line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineAllocation {
    pub line_id: String,
    pub quantity: f64,
}

/// Immutable record of one settlement or refund on a table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionRecord {
    pub collection_id: String,
    pub table_id: String,
    pub method: PaymentMethod,
    /// Rounded amount; negative for refunds
    pub amount: f64,
    #[serde(default)]
    pub kind: CollectionKind,
    /// Per-line allocations. `None` for amount-only payments, which
    /// downstream reconciliation must exclude from per-item
    /// paid-quantity bookkeeping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocations: Option<Vec<LineAllocation>>,
    pub created_by: String,
    /// Milliseconds since epoch
    pub timestamp: i64,
}

impl CollectionRecord {
    /// Amount-only payments carry no per-line allocation.
    pub fn is_amount_only(&self) -> bool {
        self.allocations.is_none()
    }
}
