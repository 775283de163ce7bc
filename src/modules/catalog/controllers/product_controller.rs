use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::{AppError, Result};
use crate::modules::catalog::models::ProductInput;
use crate::modules::catalog::repositories::ProductRepository;

/// POST /products
pub async fn create_product(
    repo: web::Data<Arc<dyn ProductRepository>>,
    request: web::Json<ProductInput>,
) -> Result<HttpResponse> {
    let product = repo.insert(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

/// GET /products
pub async fn list_products(
    repo: web::Data<Arc<dyn ProductRepository>>,
) -> Result<HttpResponse> {
    let products = repo.list().await?;
    Ok(HttpResponse::Ok().json(products))
}

/// GET /products/{id}
pub async fn get_product(
    repo: web::Data<Arc<dyn ProductRepository>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let product = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("product {}", id)))?;
    Ok(HttpResponse::Ok().json(product))
}

/// PUT /products/{id}
pub async fn update_product(
    repo: web::Data<Arc<dyn ProductRepository>>,
    path: web::Path<i64>,
    request: web::Json<ProductInput>,
) -> Result<HttpResponse> {
    let product = repo.update(path.into_inner(), request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// DELETE /products/{id}
pub async fn delete_product(
    repo: web::Data<Arc<dyn ProductRepository>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    repo.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure product routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::post().to(create_product))
            .route("", web::get().to(list_products))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}
