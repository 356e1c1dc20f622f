//! Order workflow: sequences one pick request through the order lifecycle.

use std::sync::{Arc, Mutex, PoisonError};

use stockflow_core::{DomainResult, Entity, OrderId, Sku};
use stockflow_inventory::{PickReceipt, Warehouse};

use crate::order::{Order, OrderState};
use crate::queue::{PickTask, PickTaskQueue};

/// A shipped order and the pick that fed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fulfillment {
    pub order_id: OrderId,
    pub state: OrderState,
    pub picked: PickReceipt,
}

impl core::fmt::Display for Fulfillment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Successfully ordered {} units of sku {}, shipped!",
            self.picked.quantity, self.picked.sku
        )
    }
}

#[derive(Debug)]
pub struct OrderWorkflow {
    warehouse: Arc<Warehouse>,
    queue: Mutex<PickTaskQueue>,
}

impl OrderWorkflow {
    pub fn new(warehouse: Arc<Warehouse>) -> Self {
        Self {
            warehouse,
            queue: Mutex::new(PickTaskQueue::new()),
        }
    }

    pub fn warehouse(&self) -> &Arc<Warehouse> {
        &self.warehouse
    }

    /// Place, confirm, pick and ship an order for `qty` of `sku`.
    ///
    /// A pick failure is returned unchanged; the order ends FAILED. There is
    /// no retry and no backorder.
    pub fn order_and_fulfill(&self, sku: impl Into<Sku>, qty: u64) -> DomainResult<Fulfillment> {
        let sku = sku.into();

        let mut order = Order::place();
        order.confirm()?;

        let task = PickTask::new(sku, qty);
        let task = {
            let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
            queue.enqueue(task.clone());
            queue.dequeue().unwrap_or(task)
        };

        match self.warehouse.pick(task.sku, task.qty) {
            Ok(picked) => {
                order.mark_picked()?;
                order.ship()?;
                tracing::info!(order_id = %order.id(), location = %picked.location, "order shipped");
                Ok(Fulfillment {
                    order_id: *order.id(),
                    state: order.state(),
                    picked,
                })
            }
            Err(e) => {
                order.mark_failed()?;
                tracing::warn!(order_id = %order.id(), state = %order.state(), error = %e, "order failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stockflow_core::{DomainError, LocationKind, LocationName};
    use stockflow_observability::HistoryLog;

    fn stocked(qty: u64) -> (OrderWorkflow, Arc<HistoryLog>) {
        let history = Arc::new(HistoryLog::new());
        let wh = Arc::new(Warehouse::with_sink(history.clone()));
        wh.register_receiving_location("R1").unwrap();
        wh.register_storage_location("S1").unwrap();
        wh.receive("R1", "A123", qty).unwrap();
        wh.putaway("R1", "S1", "A123", qty).unwrap();
        (OrderWorkflow::new(wh), history)
    }

    #[test]
    fn fulfilled_order_ships_and_debits_storage() {
        let (workflow, _) = stocked(8);

        let done = workflow.order_and_fulfill("A123", 5).unwrap();
        assert_eq!(done.state, OrderState::Shipped);
        assert_eq!(done.picked.location, LocationName::new("S1"));
        assert_eq!(done.to_string(), "Successfully ordered 5 units of sku A123, shipped!");
        assert_eq!(
            workflow.warehouse().quantity_at(
                LocationKind::Storage,
                &LocationName::new("S1"),
                &Sku::new("A123")
            ),
            3
        );
    }

    #[test]
    fn pick_failure_propagates_unchanged() {
        let (workflow, history) = stocked(3);
        let entries_before = history.len();

        let direct = workflow.warehouse().pick("A123", 5).unwrap_err();
        let via_order = workflow.order_and_fulfill("A123", 5).unwrap_err();
        assert_eq!(via_order, direct);
        assert_eq!(
            via_order,
            DomainError::InsufficientStock(
                "Failed to pick 5 units of sku A123, ensure sufficient inventory".into()
            )
        );
        assert_eq!(history.len(), entries_before);
        assert_eq!(workflow.warehouse().aggregate_quantity(&Sku::new("A123")), 3);
    }

    #[test]
    fn zero_quantity_order_fails_like_a_pick() {
        let (workflow, _) = stocked(3);
        let err = workflow.order_and_fulfill("A123", 0).unwrap_err();
        assert_eq!(err.code(), "invalid_quantity");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: a run of orders ships exactly as many units as it removes.
        #[test]
        fn shipped_units_match_stock_removed(orders in prop::collection::vec(1u64..6, 1..30)) {
            let (workflow, _) = stocked(40);
            let sku = Sku::new("A123");
            let mut shipped = 0u64;

            for qty in orders {
                if let Ok(done) = workflow.order_and_fulfill("A123", qty) {
                    prop_assert_eq!(done.state, OrderState::Shipped);
                    shipped += qty;
                }
            }

            prop_assert_eq!(workflow.warehouse().aggregate_quantity(&sku) + shipped, 40);
        }
    }
}
