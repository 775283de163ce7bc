// Invoice header plus the wire DTOs for the create/status operations.
//
// An invoice owns its lines (deleting the header deletes the lines) and moves
// through a small status lifecycle: pending -> paid | cancelled, with
// paid -> cancelled allowed for after-the-fact voiding. Nothing leaves
// cancelled, and nothing returns to pending.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::{CartEntryRequest, InvoiceLine};
use crate::modules::customers::Customer;

/// Invoice status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Created, awaiting settlement
    Pending,
    /// Settled in full
    Paid,
    /// Voided; terminal
    Cancelled,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Pending
    }
}

impl InvoiceStatus {
    /// Legal transitions only move forward; cancelled and paid never return
    /// to pending.
    pub fn can_transition(self, next: InvoiceStatus) -> bool {
        matches!(
            (self, next),
            (InvoiceStatus::Pending, InvoiceStatus::Paid)
                | (InvoiceStatus::Pending, InvoiceStatus::Cancelled)
                | (InvoiceStatus::Paid, InvoiceStatus::Cancelled)
        )
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Pending => write!(f, "pending"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            "cancelled" => Ok(InvoiceStatus::Cancelled),
            _ => Err(format!("invalid invoice status: {}", s)),
        }
    }
}

/// A committed (or about-to-be-committed, id == 0) invoice header.
#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    pub customer_id: i64,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,

    pub total_amount: Decimal,
    pub tax_amount: Decimal,
    pub discount: Decimal,
    pub final_amount: Decimal,

    pub is_custom_order: bool,
    pub is_repair: bool,
    pub estimated_ready_date: Option<NaiveDate>,
    pub deposit_amount: Decimal,
    pub warranty_months: Option<i64>,
    pub appraisal_value: Option<Decimal>,

    pub status: InvoiceStatus,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire payload for POST /invoices. Client-supplied totals, if present in the
/// JSON, are ignored; pricing is recomputed server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceRequest {
    pub customer_id: i64,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub items: Vec<CartEntryRequest>,

    #[serde(default)]
    pub tax_amount: Decimal,
    #[serde(default)]
    pub discount: Decimal,

    #[serde(default)]
    pub is_custom_order: bool,
    #[serde(default)]
    pub is_repair: bool,
    pub estimated_ready_date: Option<NaiveDate>,
    #[serde(default)]
    pub deposit_amount: Decimal,
    pub warranty_months: Option<i64>,
    pub appraisal_value: Option<Decimal>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<i64>,
}

/// Success payload for POST /invoices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceReceipt {
    pub invoice_id: i64,
    pub invoice_number: String,
}

/// Wire payload for POST /invoices/{id}/status
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Read-only, fully populated view for document rendering: header, customer,
/// and ordered lines with resolved product/service names.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceAggregate {
    pub invoice: Invoice,
    pub customer: Customer,
    pub lines: Vec<InvoiceLineDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLineDetail {
    #[serde(flatten)]
    pub line: InvoiceLine,
    /// Resolved product or service name
    pub description: String,
}
