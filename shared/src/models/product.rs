//! Product Model

use serde::{Deserialize, Serialize};

/// Product summary frozen into a cart line when the product is added
///
/// Display and stock context only; none of these fields participate in
/// monetary calculations. Freezing the values keeps the cart stable even
/// if the catalog record changes mid-transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSummary {
    pub product_id: i64,
    pub display_name: String,
    pub image_url: String,
    /// Condition label (e.g. "NM", "傷あり")
    pub condition_name: String,
    /// Buy-only products are purchased but never listed for resale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_buy_only: Option<bool>,
    /// Stock count at the time the product was added
    pub stock_number: i32,
    /// Skip stock adjustment when the transaction is finalized
    #[serde(default)]
    pub dont_adjust_stock_number: bool,
    #[serde(default)]
    pub infinite_stock: bool,
    /// Standing buylist price (display reference)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_purchase_price: Option<i64>,
    /// Condition-specific buylist price (display reference)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_specific_purchase_price: Option<i64>,
    /// 管理番号
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_number: Option<String>,
}
