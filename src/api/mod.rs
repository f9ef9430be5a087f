pub mod format;
pub mod openapi;

pub use format::{document_to_api_value, documents_to_api_values};
