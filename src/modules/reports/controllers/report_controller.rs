use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::Result;
use crate::modules::reports::services::ReportService;

#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_days() -> i64 {
    30
}

/// GET /reports/sales?days=N
pub async fn sales_report(
    service: web::Data<Arc<ReportService>>,
    query: web::Query<SalesQuery>,
) -> Result<HttpResponse> {
    let summary = service.sales_summary(query.days).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// GET /reports/inventory
pub async fn inventory_report(service: web::Data<Arc<ReportService>>) -> Result<HttpResponse> {
    let summary = service.inventory_summary().await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/sales", web::get().to(sales_report))
            .route("/inventory", web::get().to(inventory_report)),
    );
}
