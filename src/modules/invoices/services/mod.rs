pub mod invoice_service;
pub mod numbering;
pub mod pricing;
pub mod stock;

pub use invoice_service::InvoiceService;
pub use numbering::InvoiceNumberGenerator;
