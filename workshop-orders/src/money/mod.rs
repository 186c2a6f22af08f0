//! Money calculation utilities using rust_decimal for precision
//!
//! Every amount in the core is a `Decimal`. Line totals are kept at full
//! precision and the order total is rounded once, at the end of the fold,
//! to 2 decimal places half-up.

use crate::draft::LineItem;
use crate::error::OrderError;
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price (1,000,000)
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
/// Maximum allowed quantity per line item
pub const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed payment amount (1,000,000)
pub const MAX_PAYMENT_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Round a monetary value to 2 decimal places, half-up
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Unrounded line total: applied unit price × quantity
#[inline]
pub fn line_total(item: &LineItem) -> Decimal {
    item.applied_unit_price * Decimal::from(item.quantity)
}

/// Order total over the given line items
///
/// A pure fold: no state, rounding applied only to the final sum.
pub fn compute_total<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> Decimal {
    round_money(items.into_iter().map(line_total).sum())
}

/// Change owed to the customer for a cash tender (never negative)
pub fn change_due(tendered: Decimal, amount_due: Decimal) -> Decimal {
    round_money((tendered - amount_due).max(Decimal::ZERO))
}

/// Validate a line item quantity
pub fn validate_quantity(quantity: i32) -> Result<(), OrderError> {
    if quantity <= 0 {
        return Err(OrderError::InvalidQuantity(format!(
            "quantity must be positive, got {}",
            quantity
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(OrderError::InvalidQuantity(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }
    Ok(())
}

/// Validate a catalog unit price before it is snapshotted into a line item
pub fn validate_unit_price(price: Decimal) -> Result<(), OrderError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(OrderError::InvalidAmount(format!(
            "price must be non-negative, got {}",
            price
        )));
    }
    if price > MAX_PRICE {
        return Err(OrderError::InvalidAmount(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, price
        )));
    }
    Ok(())
}

/// Validate a payment amount: strictly positive and within bounds
pub fn validate_payment_amount(amount: Decimal) -> Result<(), OrderError> {
    if amount <= Decimal::ZERO {
        return Err(OrderError::InvalidAmount(format!(
            "payment amount must be positive, got {}",
            amount
        )));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(OrderError::InvalidAmount(format!(
            "payment amount exceeds maximum allowed ({}), got {}",
            MAX_PAYMENT_AMOUNT, amount
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
