//! Money calculation for buyback transactions
//!
//! All stored amounts are integer yen (the smallest currency unit).
//! Percentage and tax math run through `Decimal` with explicit rounding
//! strategies; floating point never enters a monetary path.

use crate::carts::error::CartError;
use crate::pricing::evaluate_discount;
use rust_decimal::prelude::*;
use shared::transaction::{CartLine, DiscountMode, GlobalDiscount, TransactionSnapshot, Variant};

/// Maximum allowed unit price (¥100,000,000)
pub const MAX_UNIT_PRICE: i64 = 100_000_000;
/// Maximum allowed quantity per variant
pub const MAX_ITEM_COUNT: i32 = 9999;

/// Validate a unit price at the operation boundary
pub fn validate_unit_price(unit_price: i64) -> Result<(), CartError> {
    if unit_price < 0 {
        return Err(CartError::InvalidAmount(format!(
            "unit price must be non-negative, got {}",
            unit_price
        )));
    }
    if unit_price > MAX_UNIT_PRICE {
        return Err(CartError::InvalidAmount(format!(
            "unit price exceeds maximum allowed ({}), got {}",
            MAX_UNIT_PRICE, unit_price
        )));
    }
    Ok(())
}

/// Validate an item count at the operation boundary
pub fn validate_item_count(item_count: i32) -> Result<(), CartError> {
    if item_count > MAX_ITEM_COUNT {
        return Err(CartError::InvalidQuantity(format!(
            "item count exceeds maximum allowed ({}), got {}",
            MAX_ITEM_COUNT, item_count
        )));
    }
    Ok(())
}

/// Per-unit adjustment from the variant's individual discount
pub fn individual_adjustment(variant: &Variant) -> i64 {
    variant
        .individual_discount
        .as_deref()
        .map(|expr| evaluate_discount(expr, variant.unit_price))
        .unwrap_or(0)
}

/// Per-unit adjustment from the variant's sale attribution
pub fn sale_adjustment(variant: &Variant) -> i64 {
    variant
        .sale
        .as_ref()
        .and_then(|s| s.discount_amount.as_deref())
        .map(|expr| evaluate_discount(expr, variant.unit_price))
        .unwrap_or(0)
}

/// Line contribution of one variant
///
/// `(unit_price + individual adjustment + sale adjustment) * item_count`;
/// both adjustments are evaluated against this variant's own unit price.
pub fn variant_contribution(variant: &Variant) -> i64 {
    let unit = variant.unit_price + individual_adjustment(variant) + sale_adjustment(variant);
    unit * variant.item_count as i64
}

/// Subtotal across all cart lines
///
/// An integer sum of per-variant contributions, so reordering add
/// operations that produce the same multiset of variants cannot change it.
pub fn calculate_subtotal(carts: &[CartLine]) -> i64 {
    carts
        .iter()
        .flat_map(|line| &line.variants)
        .map(variant_contribution)
        .sum()
}

/// Global discount magnitude against a subtotal
///
/// Percent mode: `abs(floor(subtotal * value / 100))`; fixed mode:
/// `abs(floor(value))`. Always a non-negative magnitude; the total
/// formula adds it, since on the buy side a transaction-level discount
/// raises the payout to the customer.
pub fn global_discount_amount(discount: &GlobalDiscount, subtotal: i64) -> i64 {
    match discount.mode {
        DiscountMode::Percent => (Decimal::from(subtotal) * discount.value
            / Decimal::ONE_HUNDRED)
            .floor()
            .abs()
            .to_i64()
            .unwrap_or(0),
        DiscountMode::Fixed => discount.value.floor().abs().to_i64().unwrap_or(0),
    }
}

/// Extract tax from a tax-inclusive total
///
/// `round(total * rate / (100 + rate))`, midpoint away from zero.
/// Returns 0 when the total is negative or the rate falls outside (0, 100).
pub fn calculate_tax(total: i64, tax_rate: i32) -> i64 {
    if total < 0 {
        return 0;
    }
    if tax_rate <= 0 || tax_rate >= 100 {
        return 0;
    }
    let rate = Decimal::from(tax_rate);
    (Decimal::from(total) * rate / (Decimal::ONE_HUNDRED + rate))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Recompute every derived field on a snapshot in one pass
///
/// subtotal → global discount magnitude → total → change → tax. The
/// formulas are non-recursive; no fixed-point iteration is needed.
pub fn recalculate_totals(snapshot: &mut TransactionSnapshot, tax_rate: i32) {
    let subtotal = calculate_subtotal(&snapshot.carts);

    let discount = snapshot
        .global_discount
        .as_ref()
        .map(|d| global_discount_amount(d, subtotal))
        .unwrap_or(0);

    let total = subtotal + discount;

    // Only a positive received amount recomputes change; a manually
    // entered change amount is never clobbered by clearing the input.
    if let Some(received) = snapshot.received_amount {
        if received > 0 {
            snapshot.change_amount = Some(received - total);
        }
    }

    snapshot.subtotal_amount = subtotal;
    snapshot.discount_amount = discount;
    snapshot.total_amount = total;
    snapshot.tax_amount = calculate_tax(total, tax_rate);
}
