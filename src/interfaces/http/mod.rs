pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ErrorDetail, ServerErrorBody, ValidationErrorBody};
pub use routes::{AppState, create_router};
