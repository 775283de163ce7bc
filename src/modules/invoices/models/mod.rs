pub mod invoice;
pub mod line_item;

pub use invoice::{
    CreateInvoiceRequest, Invoice, InvoiceAggregate, InvoiceLineDetail, InvoiceReceipt,
    InvoiceStatus, UpdateStatusRequest,
};
pub use line_item::{CartEntryRequest, InvoiceLine, LineRef, NewInvoiceLine};
