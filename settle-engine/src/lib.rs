//! Table settlement engine for the hospitality back office
//!
//! Given a table's outstanding order lines, the engine lets a cashier
//! apply partial payments, equal "1/n" splits, percentage and
//! fixed-amount discounts, and refunds, while keeping paid quantities,
//! collected amounts and discount math consistent.
//!
//! # Architecture
//!
//! ```text
//! UI gestures → PaymentSession (selection + keypad state machine)
//!                      ↓
//!             commit_payment / refund_line
//!                      ↓
//!             CollectionRecord → collection collaborator
//! ```
//!
//! The engine holds no cache of order truth: every operation takes the
//! current slice of order lines from the order collaborator and
//! recomputes totals from scratch. Execution is single-threaded and
//! synchronous per table session; persistence, network submission and
//! retries belong to external collaborators.

pub mod actions;
pub mod error;
pub mod money;
pub mod pricing;
pub mod session;

// Re-exports
pub use actions::{commit_payment, refund_line};
pub use error::SettleError;
pub use session::{Key, KeypadMode, KeypadSignal, PaymentSession, SelectionEntry, SelectionSet};

// Re-export shared types for convenience
pub use shared::order::{
    CollectionKind, CollectionRecord, DiscountSpec, LineAllocation, OrderLine, PaymentMethod,
};
