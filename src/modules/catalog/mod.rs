// Catalog registry: categories, suppliers, products, and jewelry services.

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::{Category, JewelryService, Product, ServiceType, Supplier};
pub use repositories::{
    CategoryRepository, ProductRepository, ServiceRepository, SqliteProductRepository,
    SqliteServiceRepository, SupplierRepository,
};
