use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};

use crate::app::services::AppServices;

pub async fn health() -> &'static str {
    "OK"
}

/// Full Catalog + Ledger snapshot.
pub async fn status(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.warehouse().snapshot())
}

/// Accepted mutations, oldest first.
pub async fn history(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "entries": services.history().lines(),
    }))
}
