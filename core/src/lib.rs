//! # OTP Core
//!
//! Domain layer for SMS one-time passcodes.
//! This crate contains the OTP record entity, the lifecycle service that issues
//! and verifies codes, the fixed-window rate limiter guarding issuance, the
//! store and delivery seams, and the error types that flow through them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
