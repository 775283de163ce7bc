use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// A customer record with the jewelry-specific profile the shop keeps for
/// repeat business (sizing, gift dates, style preferences).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,

    pub birthdate: Option<NaiveDate>,
    pub anniversary: Option<NaiveDate>,
    pub preferences: Option<String>,
    pub ring_size: Option<String>,
    pub bracelet_size: Option<String>,
    pub necklace_length: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,

    pub birthdate: Option<NaiveDate>,
    pub anniversary: Option<NaiveDate>,
    pub preferences: Option<String>,
    pub ring_size: Option<String>,
    pub bracelet_size: Option<String>,
    pub necklace_length: Option<String>,
}

impl CustomerInput {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("customer name is required"));
        }
        Ok(())
    }
}
