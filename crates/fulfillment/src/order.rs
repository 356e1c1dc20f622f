use serde::{Deserialize, Serialize};

use stockflow_core::{DomainError, DomainResult, Entity, OrderId};

/// Order status lifecycle.
///
/// Only `Placed -> Confirmed -> (Picked -> Shipped | Failed)` and `Canceled`
/// are reachable today; the transport states are declared for later tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    Placed,
    Confirmed,
    Picking,
    Picked,
    Shipped,
    InTransit,
    OutForDelivery,
    Delivered,
    Canceled,
    Failed,
}

impl OrderState {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderState::Placed => "PLACED",
            OrderState::Confirmed => "CONFIRMED",
            OrderState::Picking => "PICKING",
            OrderState::Picked => "PICKED",
            OrderState::Shipped => "SHIPPED",
            OrderState::InTransit => "IN_TRANSIT",
            OrderState::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderState::Delivered => "DELIVERED",
            OrderState::Canceled => "CANCELED",
            OrderState::Failed => "FAILED",
        }
    }

    /// Allowed transitions out of `self`.
    pub fn can_transition_to(self, next: OrderState) -> bool {
        use OrderState::*;
        match (self, next) {
            (Placed, Confirmed) => true,
            (Confirmed, Picked) | (Confirmed, Failed) => true,
            (Picked, Shipped) => true,
            (Placed | Confirmed | Picking | Picked, Canceled) => true,
            _ => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderState::Shipped | OrderState::Canceled | OrderState::Failed
        )
    }
}

impl core::fmt::Display for OrderState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient order, alive for one synchronous fulfillment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    state: OrderState,
}

impl Order {
    /// A freshly placed order.
    pub fn place() -> Self {
        Self {
            id: OrderId::new(),
            state: OrderState::Placed,
        }
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    fn transition(&mut self, next: OrderState) -> DomainResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(DomainError::invalid_transition(self.state, next));
        }
        self.state = next;
        Ok(())
    }

    pub fn confirm(&mut self) -> DomainResult<()> {
        self.transition(OrderState::Confirmed)
    }

    pub fn mark_picked(&mut self) -> DomainResult<()> {
        self.transition(OrderState::Picked)
    }

    pub fn mark_failed(&mut self) -> DomainResult<()> {
        self.transition(OrderState::Failed)
    }

    pub fn ship(&mut self) -> DomainResult<()> {
        self.transition(OrderState::Shipped)
    }

    pub fn cancel(&mut self) -> DomainResult<()> {
        self.transition(OrderState::Canceled)
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
