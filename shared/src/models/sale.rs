//! Sale Model (promotional rules)

use serde::{Deserialize, Serialize};

/// Transaction kind for catalog lookups
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Buy,
    Sell,
}

/// Unlimited quota sentinel for [`Sale::allowed_item_count`]
pub const UNLIMITED_ITEM_COUNT: i32 = -1;

/// Promotional rule entity, fetched per product from the catalog
///
/// `allowed_item_count` is a hard ceiling on the total units attributable
/// to this sale across one entire transaction, all products included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: i64,
    pub display_name: String,
    /// Discount expression ("130%" or "50円"); None applies no adjustment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<String>,
    /// Max units attributable across one transaction; -1 = unlimited
    pub allowed_item_count: i32,
}

impl Sale {
    /// Whether the sale has no quota ceiling
    pub fn is_unlimited(&self) -> bool {
        self.allowed_item_count == UNLIMITED_ITEM_COUNT
    }
}
