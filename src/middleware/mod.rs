pub mod not_found;
pub mod response;

pub use not_found::{not_found_middleware, NOT_FOUND_BODY};
pub use response::{ApiResponse, ApiResult};
