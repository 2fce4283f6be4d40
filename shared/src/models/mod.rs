//! Catalog models
//!
//! Entities fetched from the surrounding catalog/customer services and
//! frozen into the transaction cart. All IDs are `i64`.

pub mod customer;
pub mod product;
pub mod sale;

// Re-exports
pub use customer::*;
pub use product::*;
pub use sale::*;
