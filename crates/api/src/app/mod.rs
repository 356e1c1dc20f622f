//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: domain wiring (warehouse, order workflow, history sink)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent `{ success, message }` responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router with fresh in-memory state.
pub fn build_app() -> Router {
    build_app_with(Arc::new(services::AppServices::new()))
}

/// Build the router around existing services (tests share state this way).
pub fn build_app_with(services: Arc<services::AppServices>) -> Router {
    routes::router()
        .layer(Extension(services))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::trace_requests)))
}
