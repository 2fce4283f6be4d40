//! Cart operation errors

use thiserror::Error;

/// Errors surfaced by cart operations
///
/// Every error leaves the transaction snapshot untouched; the caller
/// surfaces the message and either retries or drops the operation.
/// Unknown variant/product references are deliberately NOT errors — the
/// cart is edited interactively and treats them as logged no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// A quantity change would push a sale past its transaction-wide quota
    #[error("sale {sale_id} quota exceeded: allowed {allowed}, requested {requested}")]
    QuotaExceeded {
        sale_id: i64,
        allowed: i32,
        requested: i32,
    },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
}
