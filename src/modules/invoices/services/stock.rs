// Stock adjuster: applies on-hand quantity decrements inside the caller's
// transaction. Rolling back that transaction is the only way to undo a
// decrement; there is no compensating increment.

use chrono::Utc;
use sqlx::{Sqlite, Transaction};

use crate::core::{AppError, Result};

/// One product decrement produced by a non-service invoice line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDecrement {
    pub product_id: i64,
    pub quantity: i64,
}

/// Applies every decrement, in cart order, inside `tx`.
///
/// A missing product row fails with `ProductNotFound`. No floor check:
/// quantity may go negative on oversell.
pub async fn apply_decrements(
    tx: &mut Transaction<'_, Sqlite>,
    decrements: &[StockDecrement],
) -> Result<()> {
    for decrement in decrements {
        let result = sqlx::query(
            "UPDATE products SET quantity = quantity - ?, updated_at = ? WHERE id = ?",
        )
        .bind(decrement.quantity)
        .bind(Utc::now())
        .bind(decrement.product_id)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ProductNotFound(decrement.product_id));
        }
    }

    Ok(())
}
