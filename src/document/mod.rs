pub mod contract;
pub mod invoice;

pub use contract::{contract_layout, ContractInput};
pub use invoice::{invoice_layout, InvoiceBuyer, InvoiceInput, InvoiceKind, InvoiceSeller, LineItem};

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::error::{DocumentError, Result};

/// Read a JSON input record.
pub fn load_input<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(DocumentError::InputNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| DocumentError::InputParse {
        path: path.to_path_buf(),
        source: e,
    })
}
