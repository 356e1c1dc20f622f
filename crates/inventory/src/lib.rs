//! Inventory domain module: catalog, ledger, and allocation.
//!
//! Business rules for unit-level stock across receiving and storage areas,
//! implemented as in-process domain logic (no IO, no HTTP, no persistence).

pub mod allocation;
pub mod catalog;
pub mod ledger;
pub mod snapshot;
pub mod warehouse;

pub use allocation::{PickReceipt, PutawayReceipt, select_pick_location};
pub use catalog::{Catalog, Product};
pub use ledger::{Ledger, LedgerState, LocationRef, LocationStock};
pub use snapshot::{InventorySnapshot, LocationSnapshot, StockEntry};
pub use warehouse::{ReceiveReceipt, Warehouse};
