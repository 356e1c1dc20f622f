//! Inventory ledger: per-location quantity-on-hand.
//!
//! `credit` and `debit` are the only write paths for stock. Every compound
//! operation (putaway, pick) runs against a [`LedgerState`] borrowed through
//! [`Ledger::write`], so it observes and mutates the ledger under one lock.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use stockflow_core::{
    DomainError, DomainResult, LocationKind, LocationName, Sku, ValueObject, ensure_positive,
};

/// Address of one receiving or storage area.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationRef {
    pub kind: LocationKind,
    pub name: LocationName,
}

impl LocationRef {
    pub fn receiving(name: impl Into<LocationName>) -> Self {
        Self {
            kind: LocationKind::Receiving,
            name: name.into(),
        }
    }

    pub fn storage(name: impl Into<LocationName>) -> Self {
        Self {
            kind: LocationKind::Storage,
            name: name.into(),
        }
    }
}

impl ValueObject for LocationRef {}

impl core::fmt::Display for LocationRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} area {}", self.kind, self.name)
    }
}

/// Stock held at one location. A missing SKU means zero on hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationStock {
    name: LocationName,
    on_hand: HashMap<Sku, u64>,
}

impl LocationStock {
    fn new(name: LocationName) -> Self {
        Self {
            name,
            on_hand: HashMap::new(),
        }
    }

    pub fn name(&self) -> &LocationName {
        &self.name
    }

    pub fn quantity(&self, sku: &Sku) -> u64 {
        self.on_hand.get(sku).copied().unwrap_or(0)
    }

    /// Whether the SKU was ever credited here (a zero entry still counts).
    pub fn has_entry(&self, sku: &Sku) -> bool {
        self.on_hand.contains_key(sku)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Sku, u64)> {
        self.on_hand.iter().map(|(sku, qty)| (sku, *qty))
    }
}

/// Locations of one kind, iterated in the order they were opened.
#[derive(Debug, Clone, Default)]
struct LocationTable {
    slots: Vec<LocationStock>,
    index: HashMap<LocationName, usize>,
}

impl LocationTable {
    fn open(&mut self, name: LocationName) -> bool {
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), self.slots.len());
        self.slots.push(LocationStock::new(name));
        true
    }

    fn get(&self, name: &LocationName) -> Option<&LocationStock> {
        self.index.get(name).map(|&i| &self.slots[i])
    }

    fn get_mut(&mut self, name: &LocationName) -> Option<&mut LocationStock> {
        self.index.get(name).map(|&i| &mut self.slots[i])
    }
}

/// The ledger's data, reachable only through [`Ledger::read`] / [`Ledger::write`].
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    receiving: LocationTable,
    storage: LocationTable,
}

impl LedgerState {
    fn table(&self, kind: LocationKind) -> &LocationTable {
        match kind {
            LocationKind::Receiving => &self.receiving,
            LocationKind::Storage => &self.storage,
        }
    }

    fn table_mut(&mut self, kind: LocationKind) -> &mut LocationTable {
        match kind {
            LocationKind::Receiving => &mut self.receiving,
            LocationKind::Storage => &mut self.storage,
        }
    }

    /// Open an empty location. Returns `false` if it already exists.
    pub fn open_location(&mut self, location: &LocationRef) -> bool {
        self.table_mut(location.kind).open(location.name.clone())
    }

    pub fn contains(&self, location: &LocationRef) -> bool {
        self.location(location).is_some()
    }

    pub fn location(&self, location: &LocationRef) -> Option<&LocationStock> {
        self.table(location.kind).get(&location.name)
    }

    /// Locations of one kind in the order they were opened.
    pub fn locations(&self, kind: LocationKind) -> &[LocationStock] {
        &self.table(kind).slots
    }

    /// On-hand quantity; 0 for an unknown location or SKU.
    pub fn quantity_at(&self, location: &LocationRef, sku: &Sku) -> u64 {
        self.location(location).map_or(0, |l| l.quantity(sku))
    }

    /// Sum over every receiving then storage location.
    pub fn aggregate_quantity(&self, sku: &Sku) -> u64 {
        // `credit` keeps the total within u64, so this never saturates.
        self.checked_aggregate(sku).unwrap_or(u64::MAX)
    }

    fn checked_aggregate(&self, sku: &Sku) -> Option<u64> {
        self.receiving
            .slots
            .iter()
            .chain(self.storage.slots.iter())
            .try_fold(0u64, |total, l| total.checked_add(l.quantity(sku)))
    }

    fn ensure_creditable(&self, location: &LocationRef, sku: &Sku, qty: u64) -> DomainResult<()> {
        ensure_positive(qty)?;
        let stock = self
            .location(location)
            .ok_or_else(|| DomainError::location_not_found(location.kind, &location.name))?;
        stock
            .quantity(sku)
            .checked_add(qty)
            .map(|_| ())
            .ok_or(DomainError::InvalidQuantity(qty))
    }

    fn ensure_debitable(&self, location: &LocationRef, sku: &Sku, qty: u64) -> DomainResult<()> {
        ensure_positive(qty)?;
        let stock = self
            .location(location)
            .ok_or_else(|| DomainError::location_not_found(location.kind, &location.name))?;
        let available = stock.quantity(sku);
        if available < qty {
            return Err(DomainError::insufficient_stock(format!(
                "Insufficient quantity of sku {sku} at {location}. Requested: {qty}, Available: {available}"
            )));
        }
        Ok(())
    }

    /// Increase on-hand stock, creating the entry if absent.
    ///
    /// Rejected when the SKU's total across all locations would overflow.
    pub fn credit(&mut self, location: &LocationRef, sku: &Sku, qty: u64) -> DomainResult<u64> {
        self.ensure_creditable(location, sku, qty)?;
        self.checked_aggregate(sku)
            .and_then(|total| total.checked_add(qty))
            .ok_or(DomainError::InvalidQuantity(qty))?;
        let stock = self
            .table_mut(location.kind)
            .get_mut(&location.name)
            .ok_or_else(|| DomainError::location_not_found(location.kind, &location.name))?;

        let entry = stock.on_hand.entry(sku.clone()).or_insert(0);
        *entry += qty;
        Ok(*entry)
    }

    /// Decrease on-hand stock; rejected in full if it would go negative.
    pub fn debit(&mut self, location: &LocationRef, sku: &Sku, qty: u64) -> DomainResult<u64> {
        self.ensure_debitable(location, sku, qty)?;
        let stock = self
            .table_mut(location.kind)
            .get_mut(&location.name)
            .ok_or_else(|| DomainError::location_not_found(location.kind, &location.name))?;

        // Present: ensure_debitable saw at least `qty` (> 0) on hand.
        let entry = stock.on_hand.entry(sku.clone()).or_insert(0);
        *entry -= qty;
        Ok(*entry)
    }

    /// Debit `from` and credit `to` as one unit: both sides are validated
    /// before either is applied.
    pub fn transfer(
        &mut self,
        from: &LocationRef,
        to: &LocationRef,
        sku: &Sku,
        qty: u64,
    ) -> DomainResult<()> {
        self.ensure_debitable(from, sku, qty)?;
        self.ensure_creditable(to, sku, qty)?;
        self.debit(from, sku, qty)?;
        self.credit(to, sku, qty)?;
        Ok(())
    }
}

/// Authoritative per-location, per-SKU quantity store.
///
/// A single lock guards all locations; callers needing several reads and
/// writes to be atomic do them inside one [`Ledger::write`] closure.
#[derive(Debug, Default)]
pub struct Ledger {
    state: RwLock<LedgerState>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with shared access to a consistent view of the ledger.
    pub fn read<R>(&self, f: impl FnOnce(&LedgerState) -> R) -> R {
        // Mutations validate before applying, so a poisoned guard is still consistent.
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` with exclusive access; nothing interleaves with its effects.
    pub fn write<R>(&self, f: impl FnOnce(&mut LedgerState) -> R) -> R {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn open_location(&self, location: &LocationRef) -> bool {
        self.write(|s| s.open_location(location))
    }

    pub fn quantity_at(&self, location: &LocationRef, sku: &Sku) -> u64 {
        self.read(|s| s.quantity_at(location, sku))
    }

    pub fn aggregate_quantity(&self, sku: &Sku) -> u64 {
        self.read(|s| s.aggregate_quantity(sku))
    }

    pub fn credit(&self, location: &LocationRef, sku: &Sku, qty: u64) -> DomainResult<u64> {
        self.write(|s| s.credit(location, sku, qty))
    }

    pub fn debit(&self, location: &LocationRef, sku: &Sku, qty: u64) -> DomainResult<u64> {
        self.write(|s| s.debit(location, sku, qty))
    }
}
