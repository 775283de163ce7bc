use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::Result;
use crate::modules::catalog::models::CategoryInput;
use crate::modules::catalog::repositories::CategoryRepository;

pub async fn create_category(
    repo: web::Data<Arc<CategoryRepository>>,
    request: web::Json<CategoryInput>,
) -> Result<HttpResponse> {
    let category = repo.insert(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(category))
}

pub async fn list_categories(repo: web::Data<Arc<CategoryRepository>>) -> Result<HttpResponse> {
    let categories = repo.list().await?;
    Ok(HttpResponse::Ok().json(categories))
}

pub async fn update_category(
    repo: web::Data<Arc<CategoryRepository>>,
    path: web::Path<i64>,
    request: web::Json<CategoryInput>,
) -> Result<HttpResponse> {
    let category = repo.update(path.into_inner(), request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}

pub async fn delete_category(
    repo: web::Data<Arc<CategoryRepository>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    repo.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure category routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::post().to(create_category))
            .route("", web::get().to(list_categories))
            .route("/{id}", web::put().to(update_category))
            .route("/{id}", web::delete().to(delete_category)),
    );
}
