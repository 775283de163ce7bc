// Invoice issuance and settlement: the one subsystem with real state
// transitions and cross-entity consistency requirements.

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Invoice, InvoiceLine, InvoiceStatus};
pub use repositories::InvoiceRepository;
pub use services::InvoiceService;
