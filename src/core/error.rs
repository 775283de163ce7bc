use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Invoice references a customer that does not exist
    #[error("customer {0} not found")]
    CustomerNotFound(i64),

    /// Cart entry references a product or service that does not exist;
    /// the message names the missing reference (e.g. "product 42")
    #[error("{0} not found")]
    LineItemNotFound(String),

    /// Stock adjustment targeted a product row that does not exist
    #[error("product {0} not found")]
    ProductNotFound(i64),

    /// Negative final amount or malformed monetary input
    #[error("invalid pricing: {0}")]
    InvalidPricing(String),

    /// Invoice number collided with an already-persisted invoice
    #[error("duplicate invoice number: {0}")]
    DuplicateInvoiceNumber(String),

    /// Validation errors for business rules
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Deletion refused because other records reference the entity
    #[error("{0}")]
    Conflict(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Storage-layer failures
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Persistence(e.to_string())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "status": "error",
            "message": self.to_string(),
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::CustomerNotFound(_)
            | AppError::LineItemNotFound(_)
            | AppError::ProductNotFound(_)
            | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidPricing(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateInvoiceNumber(_) | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Configuration(_) | AppError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// Helper constructors for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn invalid_pricing(msg: impl Into<String>) -> Self {
        AppError::InvalidPricing(msg.into())
    }

    /// Missing product reference in a cart entry
    pub fn missing_product(id: i64) -> Self {
        AppError::LineItemNotFound(format!("product {}", id))
    }

    /// Missing service reference in a cart entry
    pub fn missing_service(id: i64) -> Self {
        AppError::LineItemNotFound(format!("service {}", id))
    }
}
