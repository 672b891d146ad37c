//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: engine + store wiring, startup seeding
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and mapping to engine commands
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router().layer(Extension(services)))
}
