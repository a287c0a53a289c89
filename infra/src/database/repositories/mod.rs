//! Repository implementations over MySQL

pub mod otp_repository;

pub use otp_repository::MySqlOtpRepository;
