//! Transaction snapshot - the aggregate cart state
//!
//! Derived totals are owned by the engine's recompute pass; nothing here
//! mutates itself. The snapshot is the value handed to downstream
//! persistence/receipt/UI collaborators.

use super::types::{CartLine, GlobalDiscount, PaymentMethod, Variant};
use crate::models::customer::CustomerSummary;
use serde::{Deserialize, Serialize};

/// Buy-side transaction state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionSnapshot {
    /// Assigned once persisted upstream; None while editing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Cart lines in insertion order
    pub carts: Vec<CartLine>,
    pub payment_method: PaymentMethod,
    /// Cash received from the customer-facing register input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_amount: Option<i64>,
    /// Change due; retained as-is while the received amount is absent or
    /// non-positive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_amount: Option<i64>,
    /// Single whole-transaction discount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_discount: Option<GlobalDiscount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerSummary>,

    // === Derived (recomputed on every commit) ===
    pub subtotal_amount: i64,
    /// Global discount magnitude (buy-side: added to the total)
    pub discount_amount: i64,
    pub total_amount: i64,
    /// Tax extracted from the tax-inclusive total
    pub tax_amount: i64,

    /// Creation timestamp (Unix millis)
    pub created_at: i64,
    /// Last update timestamp (Unix millis)
    pub updated_at: i64,
}

impl TransactionSnapshot {
    /// Create a new empty transaction
    pub fn new() -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: None,
            carts: Vec::new(),
            payment_method: PaymentMethod::default(),
            received_amount: None,
            change_amount: None,
            global_discount: None,
            customer: None,
            subtotal_amount: 0,
            discount_amount: 0,
            total_amount: 0,
            tax_amount: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Find the cart line holding a product
    pub fn line_for_product(&self, product_id: i64) -> Option<&CartLine> {
        self.carts.iter().find(|line| line.product_id() == product_id)
    }

    /// Find a variant by id anywhere in the cart
    pub fn find_variant(&self, variant_id: &str) -> Option<&Variant> {
        self.carts
            .iter()
            .flat_map(|line| &line.variants)
            .find(|v| v.variant_id == variant_id)
    }

    /// Mutable lookup of a variant by id anywhere in the cart
    pub fn find_variant_mut(&mut self, variant_id: &str) -> Option<&mut Variant> {
        self.carts
            .iter_mut()
            .flat_map(|line| &mut line.variants)
            .find(|v| v.variant_id == variant_id)
    }

    /// Cart-wide unit total attributed to a sale (all products)
    pub fn sale_allocated_count(&self, sale_id: i64) -> i32 {
        self.carts
            .iter()
            .flat_map(|line| &line.variants)
            .filter(|v| v.sale_id() == Some(sale_id))
            .map(|v| v.item_count)
            .sum()
    }

    /// Total units across the whole cart
    pub fn total_item_count(&self) -> i32 {
        self.carts.iter().map(|line| line.total_item_count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }
}

impl Default for TransactionSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::ProductSummary;
    use crate::transaction::types::SaleAttribution;

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

    fn attributed_variant(item_count: i32, unit_price: i64, sale_id: i64) -> Variant {
        let mut variant = Variant::new(item_count, unit_price);
        variant.sale = Some(SaleAttribution {
            sale_id,
            display_name: format!("Sale {}", sale_id),
            discount_amount: None,
            allowed_item_count: 10,
        });
        variant
    }

    #[test]
    fn test_new_transaction_is_empty() {
        let snapshot = TransactionSnapshot::new();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.id, None);
        assert_eq!(snapshot.payment_method, PaymentMethod::Cash);
        assert_eq!(snapshot.subtotal_amount, 0);
        assert_eq!(snapshot.total_amount, 0);
    }

    #[test]
    fn test_sale_allocated_count_spans_products() {
        let mut snapshot = TransactionSnapshot::new();

        let mut line_a = CartLine::new(test_product(1));
        line_a.variants.push(attributed_variant(2, 100, 7));
        line_a.variants.push(Variant::new(5, 100));

        let mut line_b = CartLine::new(test_product(2));
        line_b.variants.push(attributed_variant(3, 200, 7));
        line_b.variants.push(attributed_variant(1, 200, 8));

        snapshot.carts = vec![line_a, line_b];

        assert_eq!(snapshot.sale_allocated_count(7), 5);
        assert_eq!(snapshot.sale_allocated_count(8), 1);
        assert_eq!(snapshot.sale_allocated_count(9), 0);
        assert_eq!(snapshot.total_item_count(), 11);
    }

    #[test]
    fn test_find_variant_across_lines() {
        let mut snapshot = TransactionSnapshot::new();
        let mut line = CartLine::new(test_product(1));
        let variant = Variant::new(1, 300);
        let id = variant.variant_id.clone();
        line.variants.push(variant);
        snapshot.carts = vec![line];

        assert!(snapshot.find_variant(&id).is_some());
        assert!(snapshot.find_variant("missing").is_none());
    }

    #[test]
    fn test_snapshot_wire_form() {
        let snapshot = TransactionSnapshot::new();
        let json = serde_json::to_value(&snapshot).unwrap();

        // Unassigned optionals are skipped, derived totals always present
        assert!(json.get("id").is_none());
        assert!(json.get("received_amount").is_none());
        assert_eq!(json["payment_method"], "CASH");
        assert_eq!(json["subtotal_amount"], 0);
        assert_eq!(json["tax_amount"], 0);
    }
}
