pub mod report_service;

pub use report_service::{InventorySummary, ReportService, SalesSummary};
