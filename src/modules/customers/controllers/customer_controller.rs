use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::{AppError, Result};
use crate::modules::customers::models::CustomerInput;
use crate::modules::customers::repositories::CustomerRepository;

/// POST /customers
pub async fn create_customer(
    repo: web::Data<Arc<dyn CustomerRepository>>,
    request: web::Json<CustomerInput>,
) -> Result<HttpResponse> {
    let customer = repo.insert(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(customer))
}

/// GET /customers
pub async fn list_customers(
    repo: web::Data<Arc<dyn CustomerRepository>>,
) -> Result<HttpResponse> {
    let customers = repo.list().await?;
    Ok(HttpResponse::Ok().json(customers))
}

/// GET /customers/{id}
pub async fn get_customer(
    repo: web::Data<Arc<dyn CustomerRepository>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let customer = repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::CustomerNotFound(id))?;
    Ok(HttpResponse::Ok().json(customer))
}

/// PUT /customers/{id}
pub async fn update_customer(
    repo: web::Data<Arc<dyn CustomerRepository>>,
    path: web::Path<i64>,
    request: web::Json<CustomerInput>,
) -> Result<HttpResponse> {
    let customer = repo.update(path.into_inner(), request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(customer))
}

/// DELETE /customers/{id}
pub async fn delete_customer(
    repo: web::Data<Arc<dyn CustomerRepository>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    repo.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure customer routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("", web::post().to(create_customer))
            .route("", web::get().to(list_customers))
            .route("/{id}", web::get().to(get_customer))
            .route("/{id}", web::put().to(update_customer))
            .route("/{id}", web::delete().to(delete_customer)),
    );
}
