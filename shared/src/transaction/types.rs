//! Cart line and variant types for buy-side transactions

use crate::models::product::ProductSummary;
use crate::models::sale::{Sale, UNLIMITED_ITEM_COUNT};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Payment / Discount Types
// ============================================================================

/// Payment method for settling a buyback with the customer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// 現金
    #[default]
    Cash,
    /// 銀行振込
    Bank,
}

/// Manual discount mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountMode {
    Percent,
    Fixed,
}

/// Whole-transaction discount; at most one is active at a time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalDiscount {
    pub mode: DiscountMode,
    /// Percent mode: percent of the subtotal; fixed mode: yen
    pub value: Decimal,
}

// ============================================================================
// Cart Item Types
// ============================================================================

/// Sale attribution carried by a variant allocated against a promotional rule
///
/// Values are snapshotted at allocation time so later edits to the catalog
/// rule do not change a cart that already references it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleAttribution {
    pub sale_id: i64,
    pub display_name: String,
    /// Discount expression at allocation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<String>,
    /// Quota at allocation time (-1 = unlimited)
    pub allowed_item_count: i32,
}

impl SaleAttribution {
    /// Snapshot a catalog sale into an attribution record
    pub fn from_sale(sale: &Sale) -> Self {
        Self {
            sale_id: sale.id,
            display_name: sale.display_name.clone(),
            discount_amount: sale.discount_amount.clone(),
            allowed_item_count: sale.allowed_item_count,
        }
    }

    /// Whether the attributed sale had no quota ceiling
    pub fn is_unlimited(&self) -> bool {
        self.allowed_item_count == UNLIMITED_ITEM_COUNT
    }
}

/// One priced batch of units within a cart line
///
/// Variants are distinguished by unit price, individual discount, and sale
/// attribution. `variant_id` is opaque, assigned at creation and never
/// reused.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    pub variant_id: String,
    pub item_count: i32,
    /// Unit price in yen
    pub unit_price: i64,
    /// Per-unit discount expression, independent of sale promotions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual_discount: Option<String>,
    /// Present only when these units were allocated against a sale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale: Option<SaleAttribution>,
}

impl Variant {
    /// Create a variant with a fresh opaque id
    pub fn new(item_count: i32, unit_price: i64) -> Self {
        Self {
            variant_id: Uuid::new_v4().to_string(),
            item_count,
            unit_price,
            individual_discount: None,
            sale: None,
        }
    }

    /// Sale id this variant is attributed to, if any
    pub fn sale_id(&self) -> Option<i64> {
        self.sale.as_ref().map(|s| s.sale_id)
    }
}

/// All quantity of one product in the cart
///
/// `product.product_id` is unique across the cart; a line whose variants
/// empty out is removed entirely rather than kept hollow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product: ProductSummary,
    /// Insertion order; irrelevant to totals
    pub variants: Vec<Variant>,
}

impl CartLine {
    /// Create an empty line for a product
    pub fn new(product: ProductSummary) -> Self {
        Self {
            product,
            variants: Vec::new(),
        }
    }

    pub fn product_id(&self) -> i64 {
        self.product.product_id
    }

    /// Total units across all variants of this line
    pub fn total_item_count(&self) -> i32 {
        self.variants.iter().map(|v| v.item_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(product_id: i64) -> ProductSummary {
        ProductSummary {
            product_id,
            display_name: format!("Product {}", product_id),
            image_url: String::new(),
            condition_name: "NM".to_string(),
            is_buy_only: None,
            stock_number: 0,
            dont_adjust_stock_number: false,
            infinite_stock: false,
            original_purchase_price: None,
            original_specific_purchase_price: None,
            management_number: None,
        }
    }

    #[test]
    fn test_variant_ids_are_unique() {
        let a = Variant::new(1, 100);
        let b = Variant::new(1, 100);
        assert_ne!(a.variant_id, b.variant_id);
    }

    #[test]
    fn test_cart_line_total_item_count() {
        let mut line = CartLine::new(test_product(1));
        line.variants.push(Variant::new(3, 100));
        line.variants.push(Variant::new(4, 200));
        assert_eq!(line.total_item_count(), 7);
    }

    #[test]
    fn test_variant_optional_fields_skipped() {
        let variant = Variant::new(2, 500);
        let json = serde_json::to_string(&variant).unwrap();
        assert!(!json.contains("individual_discount"));
        assert!(!json.contains("\"sale\""));
    }

    #[test]
    fn test_sale_attribution_from_sale() {
        let sale = Sale {
            id: 7,
            display_name: "買取強化".to_string(),
            discount_amount: Some("130%".to_string()),
            allowed_item_count: 3,
        };
        let attribution = SaleAttribution::from_sale(&sale);
        assert_eq!(attribution.sale_id, 7);
        assert_eq!(attribution.discount_amount.as_deref(), Some("130%"));
        assert_eq!(attribution.allowed_item_count, 3);
        assert!(!attribution.is_unlimited());
    }
}
