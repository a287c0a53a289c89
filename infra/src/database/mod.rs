//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool creation
//! - Schema bootstrap for the OTP table
//! - The MySQL-backed OTP record store

pub mod connection;
pub mod repositories;

pub use connection::{create_pool, ensure_schema};
pub use repositories::MySqlOtpRepository;
