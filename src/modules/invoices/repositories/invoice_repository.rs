// Invoice persistence. Writes take an explicit transaction owned by the
// invoice builder so header, lines, and stock decrements commit or roll back
// as one unit. Reads go straight to the pool.

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::core::{money, AppError, Result};
use crate::modules::customers::Customer;
use crate::modules::invoices::models::{
    Invoice, InvoiceAggregate, InvoiceLine, InvoiceLineDetail, InvoiceStatus, NewInvoiceLine,
};

pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the invoice header within an existing transaction.
    ///
    /// A UNIQUE violation on invoice_number maps to `DuplicateInvoiceNumber`.
    pub async fn insert_with_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        invoice: &Invoice,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO invoices (
                invoice_number, customer_id, issue_date, due_date,
                total_amount, tax_amount, discount, final_amount,
                is_custom_order, is_repair, estimated_ready_date,
                deposit_amount, warranty_months, appraisal_value,
                status, payment_method, notes, created_by,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&invoice.invoice_number)
        .bind(invoice.customer_id)
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(invoice.total_amount.to_string())
        .bind(invoice.tax_amount.to_string())
        .bind(invoice.discount.to_string())
        .bind(invoice.final_amount.to_string())
        .bind(invoice.is_custom_order)
        .bind(invoice.is_repair)
        .bind(invoice.estimated_ready_date)
        .bind(invoice.deposit_amount.to_string())
        .bind(invoice.warranty_months)
        .bind(invoice.appraisal_value.map(|v| v.to_string()))
        .bind(invoice.status.to_string())
        .bind(&invoice.payment_method)
        .bind(&invoice.notes)
        .bind(invoice.created_by)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateInvoiceNumber(invoice.invoice_number.clone());
                }
            }
            AppError::from(e)
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Insert the invoice's lines, in cart order, within the same transaction.
    pub async fn insert_lines_with_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        invoice_id: i64,
        lines: &[NewInvoiceLine],
    ) -> Result<()> {
        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO invoice_lines (
                    invoice_id, product_id, service_id, is_service,
                    quantity, unit_price, total_price
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(invoice_id)
            .bind(line.product_id)
            .bind(line.service_id)
            .bind(line.is_service)
            .bind(line.quantity)
            .bind(line.unit_price.to_string())
            .bind(line.total_price.to_string())
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>> {
        let row = sqlx::query_as::<_, InvoiceRow>("SELECT * FROM invoices WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(InvoiceRow::into_invoice).transpose()
    }

    pub async fn find_lines(&self, invoice_id: i64) -> Result<Vec<InvoiceLine>> {
        let rows = sqlx::query_as::<_, LineRow>(
            "SELECT * FROM invoice_lines WHERE invoice_id = ? ORDER BY id",
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(LineRow::into_line).collect()
    }

    /// The renderer's view: header + customer + ordered lines with resolved
    /// product/service names.
    pub async fn find_aggregate(&self, id: i64) -> Result<Option<InvoiceAggregate>> {
        let Some(invoice) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ?")
            .bind(invoice.customer_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::CustomerNotFound(invoice.customer_id))?;

        let rows = sqlx::query_as::<_, DetailRow>(
            r#"
            SELECT
                l.id, l.invoice_id, l.product_id, l.service_id, l.is_service,
                l.quantity, l.unit_price, l.total_price,
                COALESCE(p.name, s.name, '') AS description
            FROM invoice_lines l
            LEFT JOIN products p ON p.id = l.product_id
            LEFT JOIN services s ON s.id = l.service_id
            WHERE l.invoice_id = ?
            ORDER BY l.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let lines = rows
            .into_iter()
            .map(DetailRow::into_detail)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(InvoiceAggregate {
            invoice,
            customer,
            lines,
        }))
    }

    /// All invoices, newest first.
    pub async fn list(&self) -> Result<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, InvoiceRow>(
            "SELECT * FROM invoices ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(InvoiceRow::into_invoice).collect()
    }

    /// Persist a status change. Transition legality is the caller's concern.
    pub async fn update_status(&self, id: i64, status: InvoiceStatus) -> Result<()> {
        let result = sqlx::query("UPDATE invoices SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(chrono::Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("invoice {}", id)));
        }

        Ok(())
    }
}

// Row structs for database mapping

#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: i64,
    invoice_number: String,
    customer_id: i64,
    issue_date: chrono::NaiveDate,
    due_date: Option<chrono::NaiveDate>,
    total_amount: String,
    tax_amount: String,
    discount: String,
    final_amount: String,
    is_custom_order: bool,
    is_repair: bool,
    estimated_ready_date: Option<chrono::NaiveDate>,
    deposit_amount: String,
    warranty_months: Option<i64>,
    appraisal_value: Option<String>,
    status: String,
    payment_method: Option<String>,
    notes: Option<String>,
    created_by: Option<i64>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl InvoiceRow {
    fn into_invoice(self) -> Result<Invoice> {
        use std::str::FromStr;

        let status = InvoiceStatus::from_str(&self.status)
            .map_err(|e| AppError::Persistence(format!("invoices.status: {}", e)))?;

        Ok(Invoice {
            id: self.id,
            invoice_number: self.invoice_number,
            customer_id: self.customer_id,
            issue_date: self.issue_date,
            due_date: self.due_date,
            total_amount: money::parse_stored("invoices.total_amount", &self.total_amount)?,
            tax_amount: money::parse_stored("invoices.tax_amount", &self.tax_amount)?,
            discount: money::parse_stored("invoices.discount", &self.discount)?,
            final_amount: money::parse_stored("invoices.final_amount", &self.final_amount)?,
            is_custom_order: self.is_custom_order,
            is_repair: self.is_repair,
            estimated_ready_date: self.estimated_ready_date,
            deposit_amount: money::parse_stored("invoices.deposit_amount", &self.deposit_amount)?,
            warranty_months: self.warranty_months,
            appraisal_value: money::parse_stored_opt(
                "invoices.appraisal_value",
                self.appraisal_value.as_deref(),
            )?,
            status,
            payment_method: self.payment_method,
            notes: self.notes,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LineRow {
    id: i64,
    invoice_id: i64,
    product_id: Option<i64>,
    service_id: Option<i64>,
    is_service: bool,
    quantity: i64,
    unit_price: String,
    total_price: String,
}

impl LineRow {
    fn into_line(self) -> Result<InvoiceLine> {
        Ok(InvoiceLine {
            id: self.id,
            invoice_id: self.invoice_id,
            product_id: self.product_id,
            service_id: self.service_id,
            is_service: self.is_service,
            quantity: self.quantity,
            unit_price: money::parse_stored("invoice_lines.unit_price", &self.unit_price)?,
            total_price: money::parse_stored("invoice_lines.total_price", &self.total_price)?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DetailRow {
    id: i64,
    invoice_id: i64,
    product_id: Option<i64>,
    service_id: Option<i64>,
    is_service: bool,
    quantity: i64,
    unit_price: String,
    total_price: String,
    description: String,
}

impl DetailRow {
    fn into_detail(self) -> Result<InvoiceLineDetail> {
        let line = LineRow {
            id: self.id,
            invoice_id: self.invoice_id,
            product_id: self.product_id,
            service_id: self.service_id,
            is_service: self.is_service,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_price: self.total_price,
        }
        .into_line()?;

        Ok(InvoiceLineDetail {
            line,
            description: self.description,
        })
    }
}
