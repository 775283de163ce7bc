pub mod category_controller;
pub mod product_controller;
pub mod service_controller;
pub mod supplier_controller;
