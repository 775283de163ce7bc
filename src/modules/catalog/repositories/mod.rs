pub mod category_repository;
pub mod product_repository;
pub mod service_repository;
pub mod supplier_repository;

pub use category_repository::CategoryRepository;
pub use product_repository::{ProductRepository, SqliteProductRepository};
pub use service_repository::{ServiceRepository, SqliteServiceRepository};
pub use supplier_repository::SupplierRepository;
