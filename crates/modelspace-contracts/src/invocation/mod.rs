mod receipts;
mod values;

pub use receipts::{build_receipt, write_receipt, RECEIPT_SCHEMA_VERSION};
pub use values::{EncodedFile, InputValue, InputValues, InvocationResult};
