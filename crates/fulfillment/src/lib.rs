//! Fulfillment module: order lifecycle and pick task sequencing.
//!
//! Orders are transient; stock movement is delegated to the inventory
//! crate's `Warehouse`.

pub mod order;
pub mod queue;
pub mod workflow;

pub use order::{Order, OrderState};
pub use queue::{PickTask, PickTaskQueue};
pub use workflow::{Fulfillment, OrderWorkflow};
