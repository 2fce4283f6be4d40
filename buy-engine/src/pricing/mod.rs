//! Pricing primitives for buyback transactions
//!
//! - **discount**: discount expression evaluation ("130%", "50円")
//! - **allocator**: splitting a requested quantity across quota-limited sales

pub mod allocator;
pub mod discount;

// Re-exports
pub use allocator::{AllocationSegment, allocate};
pub use discount::evaluate_discount;
