//! Owned, serializable copy of Catalog + Ledger state.
//!
//! Serializes to the shape external consumers expect:
//! `{ products: {sku: {name, sku}}, receivingLocations: {name: {name, products: {sku: {sku, quantity}}}}, storageLocations: ... }`.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use stockflow_core::{LocationKind, LocationName, Sku};

use crate::catalog::{Catalog, Product};
use crate::ledger::LedgerState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockEntry {
    pub sku: Sku,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationSnapshot {
    pub name: LocationName,
    pub products: BTreeMap<Sku, StockEntry>,
}

impl LocationSnapshot {
    pub fn quantity(&self, sku: &Sku) -> u64 {
        self.products.get(sku).map_or(0, |e| e.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySnapshot {
    #[serde(serialize_with = "products_by_sku")]
    pub products: Vec<Product>,
    #[serde(serialize_with = "locations_by_name")]
    pub receiving_locations: Vec<LocationSnapshot>,
    #[serde(serialize_with = "locations_by_name")]
    pub storage_locations: Vec<LocationSnapshot>,
}

impl InventorySnapshot {
    /// Build from a consistent view of both stores.
    pub fn capture(catalog: &Catalog, ledger: &LedgerState) -> Self {
        let locations = |kind: LocationKind| -> Vec<LocationSnapshot> {
            ledger
                .locations(kind)
                .iter()
                .map(|stock| LocationSnapshot {
                    name: stock.name().clone(),
                    products: stock
                        .entries()
                        .map(|(sku, quantity)| {
                            (
                                sku.clone(),
                                StockEntry {
                                    sku: sku.clone(),
                                    quantity,
                                },
                            )
                        })
                        .collect(),
                })
                .collect()
        };

        Self {
            products: catalog.products().to_vec(),
            receiving_locations: locations(LocationKind::Receiving),
            storage_locations: locations(LocationKind::Storage),
        }
    }

    pub fn location(&self, kind: LocationKind, name: &str) -> Option<&LocationSnapshot> {
        let list = match kind {
            LocationKind::Receiving => &self.receiving_locations,
            LocationKind::Storage => &self.storage_locations,
        };
        list.iter().find(|l| l.name.as_str() == name)
    }
}

fn products_by_sku<S: Serializer>(products: &[Product], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(products.iter().map(|p| (&p.sku, p)))
}

fn locations_by_name<S: Serializer>(
    locations: &[LocationSnapshot],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(locations.iter().map(|l| (&l.name, l)))
}
