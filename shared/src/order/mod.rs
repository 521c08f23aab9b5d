//! Order-side domain types
//!
//! - `line`: order lines and per-unit discount specifications
//! - `collection`: immutable payment/refund records emitted on settlement

pub mod collection;
pub mod line;

// Re-exports
pub use collection::{CollectionKind, CollectionRecord, LineAllocation, PaymentMethod};
pub use line::{DiscountSpec, OrderLine, QTY_EPSILON};
