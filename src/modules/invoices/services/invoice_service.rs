// Invoice builder: the single entry point that turns a cart + customer +
// metadata into a committed invoice. All persistence for one request happens
// inside one transaction acquired here; any error on any path drops the
// transaction, which rolls everything back (no partial invoice, no partial
// stock decrement survives).

use std::sync::Arc;

use chrono::Utc;

use crate::core::{money, AppError, Result};
use crate::modules::catalog::repositories::{ProductRepository, ServiceRepository};
use crate::modules::customers::repositories::CustomerRepository;
use crate::modules::invoices::models::{
    CreateInvoiceRequest, Invoice, InvoiceAggregate, InvoiceReceipt, InvoiceStatus, LineRef,
    NewInvoiceLine,
};
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::invoices::services::numbering::InvoiceNumberGenerator;
use crate::modules::invoices::services::{pricing, stock};

pub struct InvoiceService {
    pool: sqlx::SqlitePool,
    invoice_repo: InvoiceRepository,
    customer_repo: Arc<dyn CustomerRepository>,
    product_repo: Arc<dyn ProductRepository>,
    service_repo: Arc<dyn ServiceRepository>,
    numbers: InvoiceNumberGenerator,
}

impl InvoiceService {
    pub fn new(
        pool: sqlx::SqlitePool,
        customer_repo: Arc<dyn CustomerRepository>,
        product_repo: Arc<dyn ProductRepository>,
        service_repo: Arc<dyn ServiceRepository>,
    ) -> Self {
        Self {
            invoice_repo: InvoiceRepository::new(pool.clone()),
            pool,
            customer_repo,
            product_repo,
            service_repo,
            numbers: InvoiceNumberGenerator::new(),
        }
    }

    /// Create and commit an invoice from a cart.
    ///
    /// Validation and pricing run before the transaction opens; from the
    /// header insert to the stock decrements everything is one atomic unit.
    pub async fn create_invoice(&self, request: CreateInvoiceRequest) -> Result<InvoiceReceipt> {
        // 1. Customer must exist
        self.customer_repo
            .find_by_id(request.customer_id)
            .await?
            .ok_or(AppError::CustomerNotFound(request.customer_id))?;

        // 2. Every cart entry must reference an existing product or service
        if request.items.is_empty() {
            return Err(AppError::validation(
                "invoice must contain at least one line item",
            ));
        }

        let mut lines = Vec::with_capacity(request.items.len());
        let mut decrements = Vec::new();
        for item in &request.items {
            item.validate()?;
            match item.reference()? {
                LineRef::Product(id) => {
                    self.product_repo
                        .find_by_id(id)
                        .await?
                        .ok_or_else(|| AppError::missing_product(id))?;
                    decrements.push(stock::StockDecrement {
                        product_id: id,
                        quantity: item.quantity,
                    });
                    lines.push(NewInvoiceLine {
                        product_id: Some(id),
                        service_id: None,
                        is_service: false,
                        quantity: item.quantity,
                        unit_price: item.unit_price,
                        total_price: item.total_price(),
                    });
                }
                LineRef::Service(id) => {
                    self.service_repo
                        .find_by_id(id)
                        .await?
                        .ok_or_else(|| AppError::missing_service(id))?;
                    lines.push(NewInvoiceLine {
                        product_id: None,
                        service_id: Some(id),
                        is_service: true,
                        quantity: item.quantity,
                        unit_price: item.unit_price,
                        total_price: item.total_price(),
                    });
                }
            }
        }

        // 3. Totals come from the pricing calculator; tax is pass-through
        let pricing = pricing::price_cart(&request.items, request.tax_amount, request.discount)?;

        money::validate_amount("deposit_amount", request.deposit_amount)
            .map_err(AppError::Validation)?;
        if let Some(appraisal) = request.appraisal_value {
            money::validate_amount("appraisal_value", appraisal).map_err(AppError::Validation)?;
        }

        // 4. Time-derived invoice number
        let invoice_number = self.numbers.next().await;

        let now = Utc::now();
        let invoice = Invoice {
            id: 0, // assigned by the database
            invoice_number: invoice_number.clone(),
            customer_id: request.customer_id,
            issue_date: request.issue_date,
            due_date: request.due_date,
            total_amount: pricing.total_amount,
            tax_amount: pricing.tax_amount,
            discount: money::round(request.discount),
            final_amount: pricing.final_amount,
            is_custom_order: request.is_custom_order,
            is_repair: request.is_repair,
            estimated_ready_date: request.estimated_ready_date,
            deposit_amount: money::round(request.deposit_amount),
            warranty_months: request.warranty_months,
            appraisal_value: request.appraisal_value.map(money::round),
            status: InvoiceStatus::Pending,
            payment_method: request.payment_method,
            notes: request.notes,
            created_by: request.created_by,
            created_at: now,
            updated_at: now,
        };

        // 5.-7. Header, lines, and stock decrements commit as one unit.
        // Dropping `tx` on any error path rolls back everything.
        let mut tx = self.pool.begin().await?;
        let invoice_id = self.invoice_repo.insert_with_tx(&mut tx, &invoice).await?;
        self.invoice_repo
            .insert_lines_with_tx(&mut tx, invoice_id, &lines)
            .await?;
        stock::apply_decrements(&mut tx, &decrements).await?;
        tx.commit().await?;

        tracing::info!(
            invoice_id,
            invoice_number = %invoice_number,
            lines = lines.len(),
            "invoice committed"
        );

        Ok(InvoiceReceipt {
            invoice_id,
            invoice_number,
        })
    }

    /// The read-only populated view consumed by the document renderer.
    pub async fn get_invoice(&self, id: i64) -> Result<InvoiceAggregate> {
        self.invoice_repo
            .find_aggregate(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("invoice {}", id)))
    }

    pub async fn list_invoices(&self) -> Result<Vec<Invoice>> {
        self.invoice_repo.list().await
    }

    /// Move an invoice through its status lifecycle. Setting the current
    /// status again is a no-op; anything else must be a legal forward
    /// transition.
    pub async fn update_status(&self, id: i64, next: InvoiceStatus) -> Result<Invoice> {
        let invoice = self
            .invoice_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("invoice {}", id)))?;

        if invoice.status != next {
            if !invoice.status.can_transition(next) {
                return Err(AppError::validation(format!(
                    "invalid status transition from {} to {}",
                    invoice.status, next
                )));
            }
            self.invoice_repo.update_status(id, next).await?;
            tracing::info!(invoice_id = id, status = %next, "invoice status updated");
        }

        self.invoice_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("invoice {}", id)))
    }
}
