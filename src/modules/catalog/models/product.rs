// A product is a physical inventory item: on-hand quantity, retail and cost
// price, and the jewelry attributes staff search on (metal, purity, stones,
// weight, size). The barcode is a fixed-width 5-digit numeric label; once a
// product has been sold it is effectively immutable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{money, AppError, Result};

pub const BARCODE_LEN: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub barcode: Option<String>,
    pub price: Decimal,
    pub cost_price: Option<Decimal>,
    pub quantity: i64,

    // Jewelry attributes
    pub material: Option<String>,
    pub metal_type: Option<String>,
    pub purity: Option<String>,
    pub stone_type: Option<String>,
    pub stone_count: i64,
    pub stone_carat: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub size: Option<String>,

    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or updating a product. A missing barcode on create
/// means "assign the next free one".
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub barcode: Option<String>,
    pub price: Decimal,
    pub cost_price: Option<Decimal>,
    #[serde(default)]
    pub quantity: i64,

    pub material: Option<String>,
    pub metal_type: Option<String>,
    pub purity: Option<String>,
    pub stone_type: Option<String>,
    #[serde(default)]
    pub stone_count: i64,
    pub stone_carat: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub size: Option<String>,

    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,
}

impl ProductInput {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("product name cannot be empty"));
        }

        if let Some(barcode) = &self.barcode {
            validate_barcode(barcode)?;
        }

        money::validate_amount("price", self.price).map_err(AppError::Validation)?;
        if let Some(cost) = self.cost_price {
            money::validate_amount("cost_price", cost).map_err(AppError::Validation)?;
        }

        if self.quantity < 0 {
            return Err(AppError::validation("quantity cannot be negative"));
        }
        if self.stone_count < 0 {
            return Err(AppError::validation("stone_count cannot be negative"));
        }

        Ok(())
    }
}

/// Barcodes are fixed-width numeric strings, e.g. "10000".
pub fn validate_barcode(barcode: &str) -> Result<()> {
    if barcode.len() != BARCODE_LEN || !barcode.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::validation(format!(
            "barcode must be exactly {} digits, got '{}'",
            BARCODE_LEN, barcode
        )));
    }
    Ok(())
}
