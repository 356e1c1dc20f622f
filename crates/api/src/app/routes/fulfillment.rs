use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub async fn pick_product(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::PickRequest>, JsonRejection>,
) -> axum::response::Response {
    errors::with_body(payload, |body| {
        errors::outcome_response(services.warehouse().pick(body.sku, body.qty))
    })
}

pub async fn order_product(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::PickRequest>, JsonRejection>,
) -> axum::response::Response {
    errors::with_body(payload, |body| {
        errors::outcome_response(services.workflow().order_and_fulfill(body.sku, body.qty))
    })
}
