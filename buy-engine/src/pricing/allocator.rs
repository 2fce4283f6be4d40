//! Sale quota allocation
//!
//! Splits a requested quantity across the applicable sales of a product,
//! honoring each sale's transaction-wide quota and the units already
//! attributed in the cart. Sales are consumed in the order supplied by
//! the catalog (priority order); whatever is left over becomes a single
//! unattributed segment.

use shared::models::Sale;
use shared::transaction::{CartLine, SaleAttribution};
use std::collections::HashMap;

/// One slice of an allocation plan
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationSegment {
    pub quantity: i32,
    /// None for the residual unattributed slice
    pub sale: Option<SaleAttribution>,
}

/// Split `requested` units across `sales`, respecting quotas already
/// consumed in `carts`
///
/// Quota accounting is cart-wide: units attributed to a sale on any
/// product count against that sale's `allowed_item_count`, and grants
/// made earlier in the same plan count as well. Segment quantities always
/// sum to `requested`; non-positive requests yield an empty plan.
pub fn allocate(requested: i32, carts: &[CartLine], sales: &[Sale]) -> Vec<AllocationSegment> {
    if requested <= 0 {
        return Vec::new();
    }

    let mut remaining = requested;
    let mut segments = Vec::new();
    let mut granted_this_plan: HashMap<i64, i32> = HashMap::new();

    for sale in sales {
        if remaining <= 0 {
            break;
        }

        // Units already attributed to this sale anywhere in the cart
        let already_allocated: i32 = carts
            .iter()
            .flat_map(|line| &line.variants)
            .filter(|v| v.sale_id() == Some(sale.id))
            .map(|v| v.item_count)
            .sum::<i32>()
            + granted_this_plan.get(&sale.id).copied().unwrap_or(0);

        let available = if sale.is_unlimited() {
            remaining
        } else {
            (sale.allowed_item_count - already_allocated).max(0)
        };

        let grant = available.min(remaining);
        if grant <= 0 {
            tracing::debug!(sale_id = sale.id, "sale quota exhausted, skipping");
            continue;
        }

        *granted_this_plan.entry(sale.id).or_insert(0) += grant;
        segments.push(AllocationSegment {
            quantity: grant,
            sale: Some(SaleAttribution::from_sale(sale)),
        });
        remaining -= grant;
    }

    if remaining > 0 {
        segments.push(AllocationSegment {
            quantity: remaining,
            sale: None,
        });
    }

    segments
}
