use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::Result;
use crate::modules::catalog::models::SupplierInput;
use crate::modules::catalog::repositories::SupplierRepository;

pub async fn create_supplier(
    repo: web::Data<Arc<SupplierRepository>>,
    request: web::Json<SupplierInput>,
) -> Result<HttpResponse> {
    let supplier = repo.insert(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(supplier))
}

pub async fn list_suppliers(repo: web::Data<Arc<SupplierRepository>>) -> Result<HttpResponse> {
    let suppliers = repo.list().await?;
    Ok(HttpResponse::Ok().json(suppliers))
}

pub async fn update_supplier(
    repo: web::Data<Arc<SupplierRepository>>,
    path: web::Path<i64>,
    request: web::Json<SupplierInput>,
) -> Result<HttpResponse> {
    let supplier = repo.update(path.into_inner(), request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(supplier))
}

pub async fn delete_supplier(
    repo: web::Data<Arc<SupplierRepository>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    repo.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure supplier routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/suppliers")
            .route("", web::post().to(create_supplier))
            .route("", web::get().to(list_suppliers))
            .route("/{id}", web::put().to(update_supplier))
            .route("/{id}", web::delete().to(delete_supplier)),
    );
}
