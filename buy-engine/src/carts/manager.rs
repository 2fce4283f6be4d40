//! Cart manager for buy-side transactions
//!
//! `CartManager` owns one [`TransactionSnapshot`] and applies every
//! mutation as an atomic transition: validate first, transform, then
//! commit a fully recomputed snapshot. A rejected operation leaves the
//! previous snapshot intact, and unknown references are logged no-ops,
//! so an interactive register session never crashes mid-edit.
//!
//! The sale lookup is the only asynchronous step and runs to completion
//! before any mutation; a superseded lookup therefore commits nothing.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{CustomerSummary, ProductSummary, TransactionKind};
use shared::transaction::{
    CartLine, DiscountMode, GlobalDiscount, PaymentMethod, TransactionSnapshot, Variant,
};

use crate::cart_money::{self, validate_item_count, validate_unit_price};
use crate::catalog::SaleLookup;
use crate::config::EngineConfig;
use crate::pricing::{AllocationSegment, allocate, evaluate_discount};

use super::error::CartError;

/// Input for [`CartManager::add_products`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddProductsInput {
    /// Product metadata frozen into the cart line
    pub product: ProductSummary,
    pub item_count: i32,
    /// Unit price in yen agreed at reception
    pub unit_price: i64,
    /// Fixed per-unit markup entered at reception (yen)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<i64>,
    /// Force a separate variant even when an identical one exists
    /// (used to keep a batch individually deletable)
    #[serde(default)]
    pub is_unique: bool,
}

/// Stateful manager for one buy-side transaction
///
/// Callers serialize operations on a single transaction; the manager
/// itself holds no locks.
pub struct CartManager {
    catalog: Arc<dyn SaleLookup>,
    config: EngineConfig,
    snapshot: TransactionSnapshot,
}

impl std::fmt::Debug for CartManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("catalog", &"<SaleLookup>")
            .field("snapshot", &self.snapshot)
            .finish()
    }
}

impl CartManager {
    /// Create a manager over a fresh, empty transaction
    pub fn new(catalog: Arc<dyn SaleLookup>, config: EngineConfig) -> Self {
        Self {
            catalog,
            config,
            snapshot: TransactionSnapshot::new(),
        }
    }

    /// Resume a partially completed transaction
    ///
    /// Derived totals are recomputed immediately so a stale snapshot
    /// cannot leak inconsistent amounts.
    pub fn with_snapshot(
        catalog: Arc<dyn SaleLookup>,
        config: EngineConfig,
        snapshot: TransactionSnapshot,
    ) -> Self {
        let mut manager = Self {
            catalog,
            config,
            snapshot,
        };
        manager.commit();
        manager
    }

    /// Current transaction state
    pub fn snapshot(&self) -> &TransactionSnapshot {
        &self.snapshot
    }

    /// Total units across the whole cart
    pub fn total_item_count(&self) -> i32 {
        self.snapshot.total_item_count()
    }

    // ========================================================================
    // Cart mutations
    // ========================================================================

    /// Add units of a product to the cart
    ///
    /// Applicable sales are fetched once, up front; the quantity is then
    /// split across them by the allocator and each segment either merges
    /// into an existing variant with the same `(unit price, sale,
    /// effective individual discount)` or appends a new one. A lookup
    /// failure degrades to an unattributed add.
    pub async fn add_products(&mut self, input: AddProductsInput) -> Result<(), CartError> {
        if input.item_count <= 0 {
            tracing::debug!(
                product_id = input.product.product_id,
                "non-positive add ignored"
            );
            return Ok(());
        }
        validate_item_count(input.item_count)?;
        validate_unit_price(input.unit_price)?;

        let sales = match self
            .catalog
            .applicable_sales(input.product.product_id, TransactionKind::Buy)
            .await
        {
            Ok(sales) => sales,
            Err(e) => {
                tracing::warn!(
                    product_id = input.product.product_id,
                    error = %e,
                    "sale lookup failed, adding without sale attribution"
                );
                Vec::new()
            }
        };

        let plan = allocate(input.item_count, &self.snapshot.carts, &sales);
        let individual_discount = input.discount_price.map(|v| format!("{v}円"));

        for segment in plan {
            Self::place_segment(
                &mut self.snapshot.carts,
                &input,
                individual_discount.as_deref(),
                segment,
            );
        }

        self.commit();
        Ok(())
    }

    /// Merge one allocation segment into the cart, creating the product's
    /// line on first contact and reusing it for every later segment
    fn place_segment(
        carts: &mut Vec<CartLine>,
        input: &AddProductsInput,
        individual_discount: Option<&str>,
        segment: AllocationSegment,
    ) {
        let line_idx = match carts
            .iter()
            .position(|line| line.product_id() == input.product.product_id)
        {
            Some(idx) => idx,
            None => {
                carts.push(CartLine::new(input.product.clone()));
                carts.len() - 1
            }
        };
        let line = &mut carts[line_idx];

        if !input.is_unique {
            let incoming_adjustment = individual_discount
                .map(|expr| evaluate_discount(expr, input.unit_price))
                .unwrap_or(0);
            let segment_sale_id = segment.sale.as_ref().map(|s| s.sale_id);

            let merge_candidate = line.variants.iter_mut().find(|v| {
                v.unit_price == input.unit_price
                    && v.sale_id() == segment_sale_id
                    && cart_money::individual_adjustment(v) == incoming_adjustment
            });
            if let Some(existing) = merge_candidate {
                existing.item_count += segment.quantity;
                return;
            }
        }

        let mut variant = Variant::new(segment.quantity, input.unit_price);
        variant.individual_discount = individual_discount.map(str::to_owned);
        variant.sale = segment.sale;
        line.variants.push(variant);
    }

    /// Update a variant's quantity
    ///
    /// Non-positive counts delegate to deletion. A variant attributed to
    /// a finite-quota sale re-validates the cart-wide allocation first;
    /// a violation is rejected with the snapshot unchanged.
    pub fn update_item_count(&mut self, variant_id: &str, new_count: i32) -> Result<(), CartError> {
        if new_count <= 0 {
            self.delete_cart_item(variant_id);
            return Ok(());
        }
        validate_item_count(new_count)?;

        let Some(variant) = self.snapshot.find_variant(variant_id) else {
            tracing::warn!(variant_id, "update_item_count: unknown variant, ignoring");
            return Ok(());
        };
        let old_count = variant.item_count;
        let sale = variant.sale.clone();

        if let Some(sale) = sale {
            if !sale.is_unlimited() {
                let projected =
                    self.snapshot.sale_allocated_count(sale.sale_id) - old_count + new_count;
                if projected > sale.allowed_item_count {
                    return Err(CartError::QuotaExceeded {
                        sale_id: sale.sale_id,
                        allowed: sale.allowed_item_count,
                        requested: projected,
                    });
                }
            }
        }

        if let Some(variant) = self.snapshot.find_variant_mut(variant_id) {
            variant.item_count = new_count;
        }
        self.commit();
        Ok(())
    }

    /// Replace a variant's unit price
    ///
    /// Direct replacement: no quota re-check and no re-merge. Callers
    /// that need merge semantics delete and re-add instead.
    pub fn update_unit_price(
        &mut self,
        variant_id: &str,
        new_unit_price: i64,
    ) -> Result<(), CartError> {
        validate_unit_price(new_unit_price)?;

        let Some(variant) = self.snapshot.find_variant_mut(variant_id) else {
            tracing::warn!(variant_id, "update_unit_price: unknown variant, ignoring");
            return Ok(());
        };
        variant.unit_price = new_unit_price;
        self.commit();
        Ok(())
    }

    /// Remove a variant; a line emptied of variants is removed entirely
    pub fn delete_cart_item(&mut self, variant_id: &str) {
        let mut found = false;
        for line in &mut self.snapshot.carts {
            let before = line.variants.len();
            line.variants.retain(|v| v.variant_id != variant_id);
            if line.variants.len() != before {
                found = true;
            }
        }
        if !found {
            tracing::warn!(variant_id, "delete_cart_item: unknown variant, ignoring");
            return;
        }

        self.snapshot.carts.retain(|line| !line.variants.is_empty());
        self.commit();
    }

    /// Replace one variant's individual discount expression
    ///
    /// Percent mode stores a markup expression against the 100 baseline
    /// (a +10% adjustment is stored as "110%"); fixed mode stores the
    /// plain yen value. Sibling variants of the product are untouched.
    pub fn apply_individual_discount(
        &mut self,
        product_id: i64,
        variant_id: &str,
        value: Decimal,
        mode: DiscountMode,
    ) {
        let expression = match mode {
            DiscountMode::Percent => format!("{}%", Decimal::ONE_HUNDRED + value),
            DiscountMode::Fixed => value.to_string(),
        };

        let Some(line) = self
            .snapshot
            .carts
            .iter_mut()
            .find(|line| line.product_id() == product_id)
        else {
            tracing::warn!(
                product_id,
                "apply_individual_discount: unknown product, ignoring"
            );
            return;
        };
        let Some(variant) = line
            .variants
            .iter_mut()
            .find(|v| v.variant_id == variant_id)
        else {
            tracing::warn!(
                variant_id,
                "apply_individual_discount: unknown variant, ignoring"
            );
            return;
        };

        variant.individual_discount = Some(expression);
        self.commit();
    }

    /// Set the whole-transaction discount, replacing any prior one
    pub fn apply_global_discount(&mut self, value: Decimal, mode: DiscountMode) {
        self.snapshot.global_discount = Some(GlobalDiscount { mode, value });
        self.commit();
    }

    // ========================================================================
    // Payment bookkeeping
    // ========================================================================

    pub fn change_payment_method(&mut self, method: PaymentMethod) {
        self.snapshot.payment_method = method;
        self.commit();
    }

    /// Record cash received; an absent input is stored as zero
    pub fn change_cash_received(&mut self, amount: Option<i64>) {
        self.snapshot.received_amount = Some(amount.unwrap_or(0));
        self.commit();
    }

    /// Attach the upstream transaction id once persisted
    pub fn set_transaction_id(&mut self, id: i64) {
        self.snapshot.id = Some(id);
        self.commit();
    }

    pub fn set_customer(&mut self, customer: Option<CustomerSummary>) {
        self.snapshot.customer = customer;
        self.commit();
    }

    /// Discard the transaction and start an empty one
    pub fn reset(&mut self) {
        let mut snapshot = TransactionSnapshot::new();
        snapshot.change_amount = Some(0);
        self.snapshot = snapshot;
        self.commit();
    }

    /// Commit step: recompute derived totals and stamp the update time
    fn commit(&mut self) {
        cart_money::recalculate_totals(&mut self.snapshot, self.config.tax_rate);
        self.snapshot.updated_at = chrono::Utc::now().timestamp_millis();
    }
}

#[cfg(test)]
mod tests;
