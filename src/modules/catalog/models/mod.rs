pub mod category;
pub mod product;
pub mod service;
pub mod supplier;

pub use category::{Category, CategoryInput};
pub use product::{Product, ProductInput};
pub use service::{JewelryService, ServiceInput, ServiceType};
pub use supplier::{Supplier, SupplierInput};
