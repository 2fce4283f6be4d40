//! Buyback cart management
//!
//! - **manager**: `CartManager`, the mutation surface for one transaction
//! - **error**: typed cart operation errors

pub mod error;
pub mod manager;

// Re-exports
pub use error::CartError;
pub use manager::{AddProductsInput, CartManager};
