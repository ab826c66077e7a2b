pub mod responses;

pub use responses::{ErrorDetails, ErrorResponse, HealthResponse};
