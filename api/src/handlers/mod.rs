pub mod error;

pub use error::{json_error_handler, otp_error_response, status_for};
