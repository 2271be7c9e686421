//! Preorder quantity limits.

use thiserror::Error;

/// Why a requested preorder quantity was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StockError {
    /// Quantity was zero or negative.
    #[error("quantity must be at least 1 (got {0})")]
    InvalidQuantity(i32),
    /// Nothing left to sell.
    #[error("this product is sold out")]
    SoldOut,
    /// More than the customer may take.
    #[error("only {limit} available (requested {requested})")]
    ExceedsLimit {
        /// Quantity asked for.
        requested: i32,
        /// Largest quantity currently allowed.
        limit: i32,
    },
}

/// Stock currently left for a product.
///
/// Rows created before stock tracking have no remaining count; for those the
/// full `max_quantity` is still available.
#[must_use]
pub fn available_stock(max_quantity: i32, remaining_stock: Option<i32>) -> i32 {
    remaining_stock.unwrap_or(max_quantity)
}

/// Largest quantity a customer may preorder in one go.
///
/// This is the lower of `max_quantity` and the available stock, and is
/// never negative.
#[must_use]
pub fn selectable_limit(max_quantity: i32, remaining_stock: Option<i32>) -> i32 {
    max_quantity
        .min(available_stock(max_quantity, remaining_stock))
        .max(0)
}

/// Check a requested quantity against the selectable limit.
///
/// # Errors
///
/// Returns a [`StockError`] when the quantity is below one, the product is
/// sold out, or the quantity exceeds `limit`.
pub const fn check_preorder_quantity(requested: i32, limit: i32) -> Result<(), StockError> {
    if requested < 1 {
        return Err(StockError::InvalidQuantity(requested));
    }
    if limit <= 0 {
        return Err(StockError::SoldOut);
    }
    if requested > limit {
        return Err(StockError::ExceedsLimit { requested, limit });
    }
    Ok(())
}
