//! Buy-side transaction cart engine
//!
//! Implements the buyback cart for the register: quota-limited sale
//! allocation, merging of economically equivalent variants, layered
//! discounts, and integer-yen monetary aggregation. Every mutation is an
//! atomic snapshot transition.
//!
//! - **carts**: `CartManager`, the mutation surface for one transaction
//! - **cart_money**: monetary aggregation (subtotal, discount, total, tax, change)
//! - **pricing**: discount expression evaluation and sale quota allocation
//! - **catalog**: async sale lookup boundary
//! - **config**: engine configuration
//!
//! # Data Flow
//!
//! ```text
//! add_products → SaleLookup → allocate() → merge/append variants
//!                                               ↓
//!                                        commit snapshot
//!                                               ↓
//!                                      recalculate_totals()
//! ```

pub mod cart_money;
pub mod carts;
pub mod catalog;
pub mod config;
pub mod pricing;

// Re-exports
pub use carts::{AddProductsInput, CartError, CartManager};
pub use catalog::{MemorySaleCatalog, SaleLookup, SaleLookupError};
pub use config::EngineConfig;
