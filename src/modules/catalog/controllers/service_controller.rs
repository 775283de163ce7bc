use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::{AppError, Result};
use crate::modules::catalog::models::ServiceInput;
use crate::modules::catalog::repositories::ServiceRepository;

/// POST /services
pub async fn create_service(
    repo: web::Data<Arc<dyn ServiceRepository>>,
    request: web::Json<ServiceInput>,
) -> Result<HttpResponse> {
    let service = repo.insert(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(service))
}

/// GET /services
pub async fn list_services(
    repo: web::Data<Arc<dyn ServiceRepository>>,
) -> Result<HttpResponse> {
    let services = repo.list().await?;
    Ok(HttpResponse::Ok().json(services))
}

/// GET /services/{id}
pub async fn get_service(
    repo: web::Data<Arc<dyn ServiceRepository>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let service = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("service {}", id)))?;
    Ok(HttpResponse::Ok().json(service))
}

/// PUT /services/{id}
pub async fn update_service(
    repo: web::Data<Arc<dyn ServiceRepository>>,
    path: web::Path<i64>,
    request: web::Json<ServiceInput>,
) -> Result<HttpResponse> {
    let service = repo.update(path.into_inner(), request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(service))
}

/// DELETE /services/{id}
pub async fn delete_service(
    repo: web::Data<Arc<dyn ServiceRepository>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    repo.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure service routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/services")
            .route("", web::post().to(create_service))
            .route("", web::get().to(list_services))
            .route("/{id}", web::get().to(get_service))
            .route("/{id}", web::put().to(update_service))
            .route("/{id}", web::delete().to(delete_service)),
    );
}
