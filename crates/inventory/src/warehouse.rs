//! `Warehouse`: the call surface the outer layers consume.
//!
//! Owns one Catalog and one Ledger for the whole process. Lock order is
//! always catalog, then ledger.

use std::sync::{Arc, PoisonError, RwLock};

use stockflow_core::log::emit;
use stockflow_core::{DomainError, DomainResult, LocationKind, LocationName, LogLevel, LogSink, Sku};

use crate::allocation::{self, PickReceipt, PutawayReceipt};
use crate::catalog::Catalog;
use crate::ledger::{Ledger, LocationRef};
use crate::snapshot::InventorySnapshot;

/// Stock credited into a receiving area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveReceipt {
    pub sku: Sku,
    pub quantity: u64,
    pub receiving: LocationName,
}

impl core::fmt::Display for ReceiveReceipt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "received {} units of product {} into receiving area {}",
            self.quantity, self.sku, self.receiving
        )
    }
}

#[derive(Default)]
pub struct Warehouse {
    catalog: RwLock<Catalog>,
    ledger: Ledger,
    sink: Option<Arc<dyn LogSink>>,
}

impl core::fmt::Debug for Warehouse {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Warehouse")
            .field("ledger", &self.ledger)
            .field("sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

impl Warehouse {
    /// A warehouse with no audit sink.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink: Some(sink),
            ..Self::default()
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn record(&self, message: &str) {
        emit(self.sink.as_deref(), LogLevel::Info, message);
    }

    pub fn register_product(
        &self,
        name: impl Into<String>,
        sku: impl Into<Sku>,
    ) -> DomainResult<String> {
        let mut catalog = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        let product = catalog.register_product(name.into(), sku.into())?;

        let message = format!("Created new product SKU {} w/ name {}", product.sku, product.name);
        tracing::debug!(sku = %product.sku, "product registered");
        drop(catalog);

        self.record(&message);
        Ok(message)
    }

    pub fn register_location(
        &self,
        kind: LocationKind,
        name: impl Into<LocationName>,
    ) -> DomainResult<String> {
        let name = name.into();
        let mut catalog = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        catalog.register_location(kind, name.clone())?;
        self.ledger.open_location(&LocationRef {
            kind,
            name: name.clone(),
        });
        drop(catalog);

        let message = match kind {
            LocationKind::Receiving => format!("Created new receiving location {name}"),
            LocationKind::Storage => format!("Created new storage location {name}"),
        };
        tracing::debug!(kind = %kind, location = %name, "location registered");
        self.record(&message);
        Ok(message)
    }

    pub fn register_receiving_location(&self, name: impl Into<LocationName>) -> DomainResult<String> {
        self.register_location(LocationKind::Receiving, name)
    }

    pub fn register_storage_location(&self, name: impl Into<LocationName>) -> DomainResult<String> {
        self.register_location(LocationKind::Storage, name)
    }

    /// Credit inbound stock to a receiving area.
    ///
    /// The SKU does not have to be registered in the catalog.
    pub fn receive(
        &self,
        receiving: impl Into<LocationName>,
        sku: impl Into<Sku>,
        qty: u64,
    ) -> DomainResult<ReceiveReceipt> {
        let location = LocationRef {
            kind: LocationKind::Receiving,
            name: receiving.into(),
        };
        let sku = sku.into();

        let on_hand = self.ledger.write(|state| {
            if !state.contains(&location) {
                return Err(DomainError::location_not_found(location.kind, &location.name));
            }
            state.credit(&location, &sku, qty)
        })?;

        let receipt = ReceiveReceipt {
            sku,
            quantity: qty,
            receiving: location.name,
        };
        tracing::debug!(
            sku = %receipt.sku,
            location = %receipt.receiving,
            quantity = qty,
            on_hand,
            "stock received"
        );
        self.record(&receipt.to_string());
        Ok(receipt)
    }

    pub fn putaway(
        &self,
        receiving: impl Into<LocationName>,
        storage: impl Into<LocationName>,
        sku: impl Into<Sku>,
        qty: u64,
    ) -> DomainResult<PutawayReceipt> {
        let (receiving, storage, sku) = (receiving.into(), storage.into(), sku.into());

        let receipt = self
            .ledger
            .write(|state| allocation::putaway(state, &receiving, &storage, &sku, qty))
            .inspect_err(|e| tracing::debug!(error = %e, "putaway rejected"))?;

        tracing::debug!(
            sku = %receipt.sku,
            from = %receipt.receiving,
            to = %receipt.storage,
            quantity = qty,
            "stock put away"
        );
        self.record(&receipt.to_string());
        Ok(receipt)
    }

    /// Preview which storage area a pick of `qty` would use.
    pub fn select_pick_location(&self, sku: &Sku, qty: u64) -> Option<LocationName> {
        self.ledger
            .read(|state| allocation::select_pick_location(state, sku, qty))
    }

    pub fn pick(&self, sku: impl Into<Sku>, qty: u64) -> DomainResult<PickReceipt> {
        let sku = sku.into();

        let receipt = self
            .ledger
            .write(|state| allocation::pick(state, &sku, qty))
            .inspect_err(|e| tracing::debug!(error = %e, "pick rejected"))?;

        tracing::debug!(
            sku = %receipt.sku,
            location = %receipt.location,
            quantity = qty,
            "stock picked"
        );
        self.record(&receipt.to_string());
        Ok(receipt)
    }

    /// On-hand quantity at one location; 0 for unknown location or SKU.
    pub fn quantity_at(&self, kind: LocationKind, name: &LocationName, sku: &Sku) -> u64 {
        self.ledger.quantity_at(
            &LocationRef {
                kind,
                name: name.clone(),
            },
            sku,
        )
    }

    pub fn aggregate_quantity(&self, sku: &Sku) -> u64 {
        self.ledger.aggregate_quantity(sku)
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        let catalog = self.catalog.read().unwrap_or_else(PoisonError::into_inner);
        self.ledger
            .read(|state| InventorySnapshot::capture(&catalog, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stockflow_observability::HistoryLog;

    fn sku() -> Sku {
        Sku::new("A123")
    }

    fn name(n: &str) -> LocationName {
        LocationName::new(n)
    }

    fn scenario_a() -> Warehouse {
        let wh = Warehouse::new();
        wh.register_product("foobar", "A123").unwrap();
        wh.register_receiving_location("R1").unwrap();
        wh.register_storage_location("S1").unwrap();
        wh.receive("R1", "A123", 10).unwrap();
        wh
    }

    #[test]
    fn receive_then_putaway_moves_stock() {
        let wh = scenario_a();
        assert_eq!(wh.quantity_at(LocationKind::Receiving, &name("R1"), &sku()), 10);

        wh.putaway("R1", "S1", "A123", 8).unwrap();
        assert_eq!(wh.quantity_at(LocationKind::Receiving, &name("R1"), &sku()), 2);
        assert_eq!(wh.quantity_at(LocationKind::Storage, &name("S1"), &sku()), 8);

        let err = wh.putaway("R1", "S1", "A123", 8).unwrap_err();
        assert_eq!(err.code(), "insufficient_stock");
        assert_eq!(wh.quantity_at(LocationKind::Receiving, &name("R1"), &sku()), 2);
        assert_eq!(wh.quantity_at(LocationKind::Storage, &name("S1"), &sku()), 8);
    }

    #[test]
    fn pick_drains_the_only_qualifying_area() {
        let wh = scenario_a();
        wh.putaway("R1", "S1", "A123", 8).unwrap();

        let receipt = wh.pick("A123", 5).unwrap();
        assert_eq!(receipt.location, name("S1"));
        assert_eq!(wh.quantity_at(LocationKind::Storage, &name("S1"), &sku()), 3);

        let err = wh.pick("A123", 5).unwrap_err();
        assert_eq!(err.code(), "insufficient_stock");
        assert_eq!(wh.quantity_at(LocationKind::Storage, &name("S1"), &sku()), 3);
        assert_eq!(wh.quantity_at(LocationKind::Receiving, &name("R1"), &sku()), 2);
    }

    #[test]
    fn putaway_into_unregistered_storage_changes_nothing() {
        let wh = scenario_a();
        let before = wh.snapshot();

        let err = wh.putaway("R1", "NOPE", "A123", 1).unwrap_err();
        assert_eq!(err, DomainError::location_not_found(LocationKind::Storage, &name("NOPE")));
        assert_eq!(wh.snapshot(), before);
    }

    #[test]
    fn pick_prefers_lower_qualifying_stock() {
        let wh = Warehouse::new();
        wh.register_receiving_location("R1").unwrap();
        wh.register_storage_location("S1").unwrap();
        wh.register_storage_location("S2").unwrap();
        wh.receive("R1", "X", 14).unwrap();
        wh.putaway("R1", "S1", "X", 5).unwrap();
        wh.putaway("R1", "S2", "X", 9).unwrap();

        assert_eq!(wh.select_pick_location(&Sku::new("X"), 5), Some(name("S1")));
        wh.pick("X", 5).unwrap();
        assert_eq!(wh.quantity_at(LocationKind::Storage, &name("S1"), &Sku::new("X")), 0);
        assert_eq!(wh.quantity_at(LocationKind::Storage, &name("S2"), &Sku::new("X")), 9);
    }

    #[test]
    fn receive_into_unknown_area_fails() {
        let wh = Warehouse::new();
        let err = wh.receive("R1", "A123", 1).unwrap_err();
        assert_eq!(err.to_string(), "Receiving area does not exist: R1");

        wh.register_receiving_location("R1").unwrap();
        assert_eq!(wh.receive("R1", "A123", 0), Err(DomainError::InvalidQuantity(0)));
        assert_eq!(wh.aggregate_quantity(&sku()), 0);
    }

    #[test]
    fn receive_past_the_total_capacity_is_rejected() {
        let wh = Warehouse::new();
        wh.register_receiving_location("R1").unwrap();
        wh.register_receiving_location("R2").unwrap();
        wh.receive("R1", "X", u64::MAX).unwrap();

        assert_eq!(wh.receive("R2", "X", 1), Err(DomainError::InvalidQuantity(1)));
        assert_eq!(wh.aggregate_quantity(&Sku::new("X")), u64::MAX);
        assert_eq!(wh.quantity_at(LocationKind::Receiving, &name("R2"), &Sku::new("X")), 0);
    }

    #[test]
    fn duplicate_registrations_fail() {
        let wh = scenario_a();
        assert_eq!(wh.register_product("again", "A123").unwrap_err().code(), "already_exists");
        assert_eq!(wh.register_storage_location("S1").unwrap_err().code(), "already_exists");
        assert!(wh.register_storage_location("R1").is_ok());
    }

    #[test]
    fn sink_sees_one_entry_per_accepted_mutation() {
        let history = Arc::new(HistoryLog::new());
        let wh = Warehouse::with_sink(history.clone());

        wh.register_product("foobar", "A123").unwrap();
        wh.register_receiving_location("R1").unwrap();
        wh.register_storage_location("S1").unwrap();
        wh.receive("R1", "A123", 10).unwrap();
        wh.putaway("R1", "S1", "A123", 8).unwrap();
        wh.pick("A123", 5).unwrap();

        // Rejections are not recorded.
        let _ = wh.pick("A123", 50);
        let _ = wh.register_storage_location("S1");

        let messages: Vec<_> = history.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            vec![
                "Created new product SKU A123 w/ name foobar",
                "Created new receiving location R1",
                "Created new storage location S1",
                "received 10 units of product A123 into receiving area R1",
                "put away 8 units of product A123 from receiving area R1 into storage area S1",
                "picked 5 units of product A123 from storage area S1",
            ]
        );
    }

    #[test]
    fn snapshot_serializes_keyed_by_name_and_sku() {
        let wh = scenario_a();
        wh.putaway("R1", "S1", "A123", 8).unwrap();

        let json = serde_json::to_value(wh.snapshot()).unwrap();
        assert_eq!(json["products"]["A123"]["name"], "foobar");
        assert_eq!(json["receivingLocations"]["R1"]["products"]["A123"]["quantity"], 2);
        assert_eq!(json["storageLocations"]["S1"]["products"]["A123"]["quantity"], 8);
    }

    #[test]
    fn concurrent_putaways_and_picks_conserve_stock() {
        let wh = Arc::new(Warehouse::new());
        wh.register_receiving_location("R1").unwrap();
        for s in ["S1", "S2", "S3"] {
            wh.register_storage_location(s).unwrap();
        }
        wh.receive("R1", "X", 1_000).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let wh = wh.clone();
                std::thread::spawn(move || {
                    let mut picked = 0u64;
                    for i in 0..200 {
                        let storage = ["S1", "S2", "S3"][(t + i) % 3];
                        let _ = wh.putaway("R1", storage, "X", 1);
                        if wh.pick("X", 1).is_ok() {
                            picked += 1;
                        }
                    }
                    picked
                })
            })
            .collect();

        let picked: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(wh.aggregate_quantity(&Sku::new("X")) + picked, 1_000);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Receive(u64),
        Putaway(usize, u64),
        Pick(u64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u64..15).prop_map(Op::Receive),
            (0usize..3, 0u64..15).prop_map(|(s, q)| Op::Putaway(s, q)),
            (0u64..15).prop_map(Op::Pick),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: receive adds exactly qty, putaway conserves the total,
        /// pick removes exactly qty, and any failure changes nothing.
        #[test]
        fn aggregate_moves_only_by_receive_and_pick(ops in prop::collection::vec(op(), 1..60)) {
            let wh = Warehouse::new();
            wh.register_receiving_location("R1").unwrap();
            let storage = ["S1", "S2", "S3"];
            for s in storage {
                wh.register_storage_location(s).unwrap();
            }
            let x = Sku::new("X");

            for op in ops {
                let before = wh.snapshot();
                let total = wh.aggregate_quantity(&x);

                let (result, delta): (Result<(), DomainError>, i128) = match op {
                    Op::Receive(q) => (wh.receive("R1", "X", q).map(|_| ()), q as i128),
                    Op::Putaway(s, q) => (wh.putaway("R1", storage[s], "X", q).map(|_| ()), 0),
                    Op::Pick(q) => (wh.pick("X", q).map(|_| ()), -(q as i128)),
                };

                match result {
                    Ok(()) => prop_assert_eq!(wh.aggregate_quantity(&x) as i128, total as i128 + delta),
                    Err(_) => prop_assert_eq!(wh.snapshot(), before),
                }
            }
        }
    }
}
