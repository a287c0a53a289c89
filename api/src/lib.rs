//! # OTP API
//!
//! actix-web surface for the OTP gateway: the request and verify endpoints,
//! the per-address rate limiting middleware, CORS, health and error mapping.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod tasks;

pub use app::create_app;
pub use state::AppState;
