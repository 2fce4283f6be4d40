//! Catalog boundary - sale lookup
//!
//! The engine consumes exactly one external capability: given a product,
//! return its active sales for a transaction kind. This is the only
//! asynchronous edge of the engine; the lookup completes before any cart
//! mutation begins.

use async_trait::async_trait;
use shared::models::{Sale, TransactionKind};
use std::collections::HashMap;
use thiserror::Error;

/// Sale lookup failure
///
/// The cart manager downgrades a failed lookup to "no applicable sales";
/// the typed error exists for callers that need to distinguish.
#[derive(Debug, Clone, Error)]
#[error("sale lookup failed: {0}")]
pub struct SaleLookupError(pub String);

/// Active-sale lookup for a product
///
/// Implementations MUST return sales in a stable priority order: the
/// allocator consumes them in the order given and never re-sorts. The
/// production catalog orders buy-side sales best payout first.
#[async_trait]
pub trait SaleLookup: Send + Sync {
    async fn applicable_sales(
        &self,
        product_id: i64,
        kind: TransactionKind,
    ) -> Result<Vec<Sale>, SaleLookupError>;
}

/// In-memory sale catalog
///
/// Deterministic lookup for tests and embedded use. Registered sales apply
/// to buy transactions and are returned in registration order, so earlier
/// registration means higher allocation priority.
#[derive(Debug, Clone, Default)]
pub struct MemorySaleCatalog {
    buy_sales: HashMap<i64, Vec<Sale>>,
}

impl MemorySaleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sale as applicable to a product
    pub fn add_sale(&mut self, product_id: i64, sale: Sale) {
        self.buy_sales.entry(product_id).or_default().push(sale);
    }
}

#[async_trait]
impl SaleLookup for MemorySaleCatalog {
    async fn applicable_sales(
        &self,
        product_id: i64,
        kind: TransactionKind,
    ) -> Result<Vec<Sale>, SaleLookupError> {
        if kind != TransactionKind::Buy {
            return Ok(Vec::new());
        }
        Ok(self.buy_sales.get(&product_id).cloned().unwrap_or_default())
    }
}
