//! # HTTP API
//!
//! Axum-based HTTP surface for the submission intake service: one submit
//! operation plus a usage hint and a health probe, all wrapped in the shared
//! response envelope.

pub mod envelope;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{build_router, ApiState};
pub use server::start_api_server;
