use std::str::FromStr;
use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::{AppError, Result};
use crate::modules::invoices::models::{CreateInvoiceRequest, InvoiceStatus, UpdateStatusRequest};
use crate::modules::invoices::services::InvoiceService;

/// POST /invoices
pub async fn create_invoice(
    service: web::Data<Arc<InvoiceService>>,
    request: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse> {
    let receipt = service.create_invoice(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(receipt))
}

/// GET /invoices/{id}, the fully populated aggregate for rendering
pub async fn get_invoice(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let aggregate = service.get_invoice(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(aggregate))
}

/// GET /invoices
pub async fn list_invoices(service: web::Data<Arc<InvoiceService>>) -> Result<HttpResponse> {
    let invoices = service.list_invoices().await?;
    Ok(HttpResponse::Ok().json(invoices))
}

/// POST /invoices/{id}/status
pub async fn update_status(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<i64>,
    request: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse> {
    let status = InvoiceStatus::from_str(&request.status).map_err(AppError::Validation)?;
    let invoice = service.update_status(path.into_inner(), status).await?;
    Ok(HttpResponse::Ok().json(invoice))
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("", web::post().to(create_invoice))
            .route("", web::get().to(list_invoices))
            .route("/{id}", web::get().to(get_invoice))
            .route("/{id}/status", web::post().to(update_status)),
    );
}
