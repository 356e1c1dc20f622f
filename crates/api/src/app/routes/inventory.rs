use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Query},
    Json,
};

use stockflow_core::{LocationKind, LocationName, Sku};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// On-hand quantity for a SKU: at one receiving area, one storage area, or
/// across all areas (receiving area wins if both are given).
pub async fn get_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::InventoryQuery>,
) -> Json<u64> {
    let warehouse = services.warehouse();
    let sku = Sku::new(query.sku.as_str());

    let qty = if let Some(area) = query.receiving() {
        warehouse.quantity_at(LocationKind::Receiving, &LocationName::new(area), &sku)
    } else if let Some(area) = query.storage() {
        warehouse.quantity_at(LocationKind::Storage, &LocationName::new(area), &sku)
    } else {
        warehouse.aggregate_quantity(&sku)
    };
    Json(qty)
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::CreateProductRequest>, JsonRejection>,
) -> axum::response::Response {
    errors::with_body(payload, |body| {
        errors::outcome_response(services.warehouse().register_product(body.name, body.sku))
    })
}

pub async fn create_receiving_area(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::CreateAreaRequest>, JsonRejection>,
) -> axum::response::Response {
    errors::with_body(payload, |body| {
        errors::outcome_response(services.warehouse().register_receiving_location(body.name))
    })
}

pub async fn create_storage_area(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::CreateAreaRequest>, JsonRejection>,
) -> axum::response::Response {
    errors::with_body(payload, |body| {
        errors::outcome_response(services.warehouse().register_storage_location(body.name))
    })
}

pub async fn receive_product(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::ReceiveRequest>, JsonRejection>,
) -> axum::response::Response {
    errors::with_body(payload, |body| {
        errors::outcome_response(services.warehouse().receive(body.area, body.sku, body.qty))
    })
}

pub async fn putaway_product(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::PutawayRequest>, JsonRejection>,
) -> axum::response::Response {
    errors::with_body(payload, |body| {
        errors::outcome_response(services.warehouse().putaway(
            body.receiving_area,
            body.storage_area,
            body.sku,
            body.qty,
        ))
    })
}
