//! Shared types for the table settlement engine
//!
//! Domain types consumed by the engine and its UI collaborators:
//! order lines, discount specifications, collection records and
//! error codes. No engine logic lives here.

pub mod error;
pub mod order;

// Re-exports
pub use error::{CommandError, DomainError, SettleErrorCode};
pub use serde::{Deserialize, Serialize};
