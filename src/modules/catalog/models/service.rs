use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{money, AppError, Result};

/// Kinds of work the shop performs on jewelry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Repair,
    Custom,
    Cleaning,
    Engraving,
    Appraisal,
    Sizing,
    StoneSetting,
    Polishing,
    Other,
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ServiceType::Repair => "repair",
            ServiceType::Custom => "custom",
            ServiceType::Cleaning => "cleaning",
            ServiceType::Engraving => "engraving",
            ServiceType::Appraisal => "appraisal",
            ServiceType::Sizing => "sizing",
            ServiceType::StoneSetting => "stone_setting",
            ServiceType::Polishing => "polishing",
            ServiceType::Other => "other",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "repair" => Ok(ServiceType::Repair),
            "custom" => Ok(ServiceType::Custom),
            "cleaning" => Ok(ServiceType::Cleaning),
            "engraving" => Ok(ServiceType::Engraving),
            "appraisal" => Ok(ServiceType::Appraisal),
            "sizing" => Ok(ServiceType::Sizing),
            "stone_setting" => Ok(ServiceType::StoneSetting),
            "polishing" => Ok(ServiceType::Polishing),
            "other" => Ok(ServiceType::Other),
            _ => Err(format!("invalid service type: {}", s)),
        }
    }
}

/// A service offering (repair, engraving, ...). Services carry no stock.
#[derive(Debug, Clone, Serialize)]
pub struct JewelryService {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub service_type: ServiceType,
    pub price: Decimal,
    /// Estimated duration in days
    pub duration_days: Option<i64>,
    pub requires_deposit: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInput {
    pub name: String,
    pub description: Option<String>,
    pub service_type: ServiceType,
    pub price: Decimal,
    pub duration_days: Option<i64>,
    #[serde(default)]
    pub requires_deposit: bool,
}

impl ServiceInput {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("service name cannot be empty"));
        }
        money::validate_amount("price", self.price).map_err(AppError::Validation)?;
        if let Some(days) = self.duration_days {
            if days < 0 {
                return Err(AppError::validation("duration_days cannot be negative"));
            }
        }
        Ok(())
    }
}
