//! Settlement actions
//!
//! - `commit_payment`: validate the session and settle it into an
//!   immutable collection record
//! - `refund_line`: reverse previously paid quantity

mod commit_payment;
mod refund;

pub use commit_payment::commit_payment;
pub use refund::refund_line;
