pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod layout;
pub mod pdf;
pub mod schedule;

pub use config::{Config, OutputSettings, RenderSettings};
pub use document::{contract_layout, invoice_layout, ContractInput, InvoiceInput, InvoiceKind, LineItem};
pub use error::{DocumentError, Result};
pub use format::{format_amount, format_date};
pub use layout::{Document, Node};
pub use pdf::OutputFormat;
pub use schedule::{schedule_rows, sort_payments, PaymentScheduleEntry};
