use axum::{
    routing::{get, post},
    Router,
};

pub mod fulfillment;
pub mod inventory;
pub mod system;

/// Router for every endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/status", get(system::status))
        .route("/history", get(system::history))
        .route("/inventory", get(inventory::get_inventory))
        .route("/create-product", post(inventory::create_product))
        .route("/create-receiving-area", post(inventory::create_receiving_area))
        .route("/create-storage-area", post(inventory::create_storage_area))
        .route("/receive-product", post(inventory::receive_product))
        .route("/putaway-product", post(inventory::putaway_product))
        .route("/pick-product", post(fulfillment::pick_product))
        .route("/order-product", post(fulfillment::order_product))
}
