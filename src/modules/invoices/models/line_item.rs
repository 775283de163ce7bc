use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{money, AppError, Result};

/// A persisted invoice line. Exactly one of product_id / service_id is set,
/// discriminated by is_service. total_price is stored redundantly so history
/// survives later catalog price changes.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLine {
    pub id: i64,
    pub invoice_id: i64,
    pub product_id: Option<i64>,
    pub service_id: Option<i64>,
    pub is_service: bool,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// A line awaiting persistence, already validated and priced.
#[derive(Debug, Clone)]
pub struct NewInvoiceLine {
    pub product_id: Option<i64>,
    pub service_id: Option<i64>,
    pub is_service: bool,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// What a cart entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRef {
    Product(i64),
    Service(i64),
}

/// One cart entry in a create-invoice request.
#[derive(Debug, Clone, Deserialize)]
pub struct CartEntryRequest {
    pub product_id: Option<i64>,
    pub service_id: Option<i64>,
    #[serde(default)]
    pub is_service: bool,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl CartEntryRequest {
    /// The product or service this entry references, consistent with the
    /// is_service discriminator.
    pub fn reference(&self) -> Result<LineRef> {
        if self.is_service {
            match self.service_id {
                Some(id) => Ok(LineRef::Service(id)),
                None => Err(AppError::validation(
                    "service line item must carry a service_id",
                )),
            }
        } else {
            match self.product_id {
                Some(id) => Ok(LineRef::Product(id)),
                None => Err(AppError::validation(
                    "product line item must carry a product_id",
                )),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.reference()?;

        if self.quantity < 1 {
            return Err(AppError::invalid_pricing(format!(
                "quantity must be at least 1, got {}",
                self.quantity
            )));
        }

        money::validate_amount("unit_price", self.unit_price)
            .map_err(AppError::InvalidPricing)?;

        Ok(())
    }

    /// quantity × unit_price at the store scale.
    pub fn total_price(&self) -> Decimal {
        money::line_total(self.quantity, self.unit_price)
    }
}
