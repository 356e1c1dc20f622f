use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub sku: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateAreaRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ReceiveRequest {
    pub area: String,
    pub sku: String,
    pub qty: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutawayRequest {
    pub receiving_area: String,
    pub storage_area: String,
    pub sku: String,
    pub qty: u64,
}

/// Body of both `/pick-product` and `/order-product`.
#[derive(Debug, Deserialize)]
pub struct PickRequest {
    pub sku: String,
    pub qty: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryQuery {
    pub sku: String,
    pub receiving_area: Option<String>,
    pub storage_area: Option<String>,
}

impl InventoryQuery {
    /// Non-empty receiving area, if given.
    pub fn receiving(&self) -> Option<&str> {
        self.receiving_area.as_deref().filter(|s| !s.is_empty())
    }

    pub fn storage(&self) -> Option<&str> {
        self.storage_area.as_deref().filter(|s| !s.is_empty())
    }
}
