//! Discount expression evaluation
//!
//! Buy-side discount expressions come in two forms:
//! - percentage, marked with `%`, against a markup baseline of 100
//!   ("130%" means pay 130% of the unit price, an adjustment of +30%;
//!   "90%" marks the price down by 10%)
//! - fixed yen, optionally marked with `円` ("50円" adds 50 per unit;
//!   fixed amounts are normalized with `abs` so they always raise the
//!   payout)
//!
//! Parsing is deliberately permissive: malformed input evaluates to a
//! zero adjustment instead of failing, because expressions are edited
//! live at the register and must never take the cart down.

use rust_decimal::prelude::*;

/// Markup baseline for percentage expressions (100% = unchanged price)
const PERCENT_BASELINE: Decimal = Decimal::ONE_HUNDRED;

/// Evaluate a discount expression against a unit price
///
/// Returns the signed per-unit adjustment in yen, floored. Guards:
/// negative unit price, empty input, unparsable numbers, and negative
/// percentages all evaluate to 0. Pure and referentially transparent.
pub fn evaluate_discount(expression: &str, unit_price: i64) -> i64 {
    if unit_price < 0 {
        return 0;
    }

    let expr = expression.trim();
    if expr.is_empty() {
        return 0;
    }

    if expr.contains('%') {
        let value = match expr.replace('%', "").trim().parse::<Decimal>() {
            Ok(v) => v,
            Err(_) => return 0,
        };
        if value.is_sign_negative() {
            return 0;
        }
        // floor(unit_price * (value - 100) / 100)
        (Decimal::from(unit_price) * (value - PERCENT_BASELINE) / PERCENT_BASELINE)
            .floor()
            .to_i64()
            .unwrap_or(0)
    } else {
        let value = match expr.replace('円', "").trim().parse::<Decimal>() {
            Ok(v) => v,
            Err(_) => return 0,
        };
        value.floor().abs().to_i64().unwrap_or(0)
    }
}
