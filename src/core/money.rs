use rust_decimal::Decimal;
use std::str::FromStr;

use crate::core::error::AppError;

/// Monetary values carry exactly 2 decimal places (single-currency store).
pub const SCALE: u32 = 2;

/// Parses a TEXT-stored decimal column read back from the database.
pub fn parse_stored(column: &str, raw: &str) -> Result<Decimal, AppError> {
    Decimal::from_str(raw)
        .map_err(|e| AppError::Persistence(format!("invalid decimal in {}: {}", column, e)))
}

/// Parses an optional TEXT-stored decimal column.
pub fn parse_stored_opt(column: &str, raw: Option<&str>) -> Result<Option<Decimal>, AppError> {
    raw.map(|s| parse_stored(column, s)).transpose()
}

/// Rounds a monetary amount to the store scale (banker's rounding).
pub fn round(amount: Decimal) -> Decimal {
    amount.round_dp(SCALE)
}

/// Line total: quantity × unit price, rounded to the store scale.
pub fn line_total(quantity: i64, unit_price: Decimal) -> Decimal {
    round(Decimal::from(quantity) * unit_price)
}

/// Validates that an amount is non-negative and within the store scale.
pub fn validate_amount(label: &str, amount: Decimal) -> Result<(), String> {
    if amount < Decimal::ZERO {
        return Err(format!("{} cannot be negative, got {}", label, amount));
    }
    if amount.scale() > SCALE {
        return Err(format!(
            "{} must have at most {} decimal places, got {}",
            label,
            SCALE,
            amount.scale()
        ));
    }
    Ok(())
}
