pub mod response;

pub use crate::error::ApiResult;
pub use response::{ApiResponse, Payload};
