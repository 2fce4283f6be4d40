//! Buy-side transaction cart types
//!
//! This module provides the value types for the buyback cart:
//! - Types: cart lines, variants, sale attributions, discounts, payment
//! - Snapshot: the aggregate transaction state with derived totals

pub mod snapshot;
pub mod types;

// Re-exports
pub use snapshot::TransactionSnapshot;
pub use types::{
    CartLine, DiscountMode, GlobalDiscount, PaymentMethod, SaleAttribution, Variant,
};
