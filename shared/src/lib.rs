//! Shared types for the buyback platform
//!
//! Common types used across crates: catalog models (products, sales,
//! customers) and the buy-side transaction cart types consumed by the
//! engine and by downstream persistence/receipt/UI collaborators.

pub mod models;
pub mod transaction;

// Re-exports
pub use serde::{Deserialize, Serialize};
pub use transaction::{CartLine, TransactionSnapshot, Variant};
