// Pricing calculator: a pure function over the cart. No lookups, no side
// effects. tax_amount is caller-supplied and passed through opaquely; it is
// never recomputed once line items are fixed.

use rust_decimal::Decimal;

use crate::core::{money, AppError, Result};
use crate::modules::invoices::models::CartEntryRequest;

/// Monetary totals for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartPricing {
    /// Sum of line totals, pre-tax and pre-discount
    pub total_amount: Decimal,
    /// Caller-supplied tax, passed through
    pub tax_amount: Decimal,
    /// total + tax - discount
    pub final_amount: Decimal,
}

/// Computes `(total_amount, tax_amount, final_amount)` for an ordered cart.
///
/// Fails with `InvalidPricing` on non-positive quantities, negative or
/// over-scaled amounts, or a discount that exceeds total + tax.
pub fn price_cart(
    items: &[CartEntryRequest],
    tax_amount: Decimal,
    discount: Decimal,
) -> Result<CartPricing> {
    money::validate_amount("tax_amount", tax_amount).map_err(AppError::InvalidPricing)?;
    money::validate_amount("discount", discount).map_err(AppError::InvalidPricing)?;

    let mut total_amount = Decimal::ZERO;
    for item in items {
        item.validate()?;
        total_amount += item.total_price();
    }
    let total_amount = money::round(total_amount);

    let final_amount = total_amount + tax_amount - discount;
    if final_amount < Decimal::ZERO {
        return Err(AppError::invalid_pricing(format!(
            "discount {} exceeds total {} plus tax {}",
            discount, total_amount, tax_amount
        )));
    }

    Ok(CartPricing {
        total_amount,
        tax_amount: money::round(tax_amount),
        final_amount: money::round(final_amount),
    })
}
