//! Shared configuration, response types and utilities for the OTP gateway
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The `{success, message}` response envelope
//! - Phone number format checks and log masking

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, DatabaseConfig, Environment, OtpConfig, RateLimitConfig,
    ServerConfig, SmsConfig, SmsProvider,
};
pub use errors::ConfigError;
pub use types::ApiResponse;
pub use utils::phone;
