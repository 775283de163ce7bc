// Wires repositories, services, and routes onto a database pool. Shared by
// main and the contract tests so both run the same application.

use std::sync::Arc;

use actix_web::web;
use sqlx::SqlitePool;

use crate::modules::catalog::controllers::{
    category_controller, product_controller, service_controller, supplier_controller,
};
use crate::modules::catalog::repositories::{
    CategoryRepository, ProductRepository, ServiceRepository, SqliteProductRepository,
    SqliteServiceRepository, SupplierRepository,
};
use crate::modules::customers::controllers::customer_controller;
use crate::modules::customers::repositories::{CustomerRepository, SqliteCustomerRepository};
use crate::modules::health::controllers::health_controller;
use crate::modules::invoices::controllers::invoice_controller;
use crate::modules::invoices::services::InvoiceService;
use crate::modules::reports::controllers::report_controller;
use crate::modules::reports::services::ReportService;

/// All request-layer dependencies, built once per process. Cloning is cheap
/// (every field is an Arc handle), which lets the server factory closure hand
/// a copy to each worker.
#[derive(Clone)]
pub struct AppServices {
    pub category_repo: Arc<CategoryRepository>,
    pub supplier_repo: Arc<SupplierRepository>,
    pub product_repo: Arc<dyn ProductRepository>,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub customer_repo: Arc<dyn CustomerRepository>,
    pub invoice_service: Arc<InvoiceService>,
    pub report_service: Arc<ReportService>,
}

impl AppServices {
    pub fn new(pool: SqlitePool) -> Self {
        let product_repo: Arc<dyn ProductRepository> =
            Arc::new(SqliteProductRepository::new(pool.clone()));
        let service_repo: Arc<dyn ServiceRepository> =
            Arc::new(SqliteServiceRepository::new(pool.clone()));
        let customer_repo: Arc<dyn CustomerRepository> =
            Arc::new(SqliteCustomerRepository::new(pool.clone()));

        let invoice_service = Arc::new(InvoiceService::new(
            pool.clone(),
            customer_repo.clone(),
            product_repo.clone(),
            service_repo.clone(),
        ));

        Self {
            category_repo: Arc::new(CategoryRepository::new(pool.clone())),
            supplier_repo: Arc::new(SupplierRepository::new(pool.clone())),
            product_repo,
            service_repo,
            customer_repo,
            invoice_service,
            report_service: Arc::new(ReportService::new(pool)),
        }
    }

    /// Registers shared state and every route on an actix service config.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.category_repo.clone()))
            .app_data(web::Data::new(self.supplier_repo.clone()))
            .app_data(web::Data::new(self.product_repo.clone()))
            .app_data(web::Data::new(self.service_repo.clone()))
            .app_data(web::Data::new(self.customer_repo.clone()))
            .app_data(web::Data::new(self.invoice_service.clone()))
            .app_data(web::Data::new(self.report_service.clone()));

        category_controller::configure(cfg);
        supplier_controller::configure(cfg);
        product_controller::configure(cfg);
        service_controller::configure(cfg);
        customer_controller::configure(cfg);
        invoice_controller::configure(cfg);
        report_controller::configure(cfg);
        health_controller::configure(cfg);
    }
}
