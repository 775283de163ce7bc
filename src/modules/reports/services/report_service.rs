// Read-only summaries for the dashboard. Monetary columns are TEXT in SQLite,
// so sums are computed here with Decimal rather than in SQL.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::core::{money, Result};

#[derive(Debug, Clone, Serialize)]
pub struct SalesSummary {
    pub days: i64,
    pub invoice_count: i64,
    pub total_sales: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventorySummary {
    pub total_items: i64,
    pub total_value: Decimal,
}

pub struct ReportService {
    pool: SqlitePool,
}

impl ReportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Count and final-amount sum of non-cancelled invoices created within
    /// the last `days` days.
    pub async fn sales_summary(&self, days: i64) -> Result<SalesSummary> {
        let rows = sqlx::query_as::<_, SalesRow>(
            "SELECT final_amount, status, created_at FROM invoices",
        )
        .fetch_all(&self.pool)
        .await?;

        let since = Utc::now() - Duration::days(days);
        let mut invoice_count = 0i64;
        let mut total_sales = Decimal::ZERO;
        for row in rows {
            if row.status == "cancelled" || row.created_at < since {
                continue;
            }
            invoice_count += 1;
            total_sales += money::parse_stored("invoices.final_amount", &row.final_amount)?;
        }

        Ok(SalesSummary {
            days,
            invoice_count,
            total_sales: money::round(total_sales),
        })
    }

    /// On-hand item count and retail valuation of the whole catalog.
    pub async fn inventory_summary(&self) -> Result<InventorySummary> {
        let rows = sqlx::query_as::<_, StockRow>("SELECT quantity, price FROM products")
            .fetch_all(&self.pool)
            .await?;

        let mut total_items = 0i64;
        let mut total_value = Decimal::ZERO;
        for row in rows {
            total_items += row.quantity;
            total_value +=
                Decimal::from(row.quantity) * money::parse_stored("products.price", &row.price)?;
        }

        Ok(InventorySummary {
            total_items,
            total_value: money::round(total_value),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SalesRow {
    final_amount: String,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct StockRow {
    quantity: i64,
    price: String,
}
