//! Allocation engine: putaway transfers and pick-location selection.
//!
//! Everything here runs against a `&mut LedgerState`, i.e. inside a single
//! [`Ledger::write`](crate::ledger::Ledger::write) closure.

use stockflow_core::{
    DomainError, DomainResult, LocationKind, LocationName, Sku, ensure_positive,
};

use crate::ledger::{LedgerState, LocationRef};

/// Stock moved from a receiving area into a storage area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutawayReceipt {
    pub sku: Sku,
    pub quantity: u64,
    pub receiving: LocationName,
    pub storage: LocationName,
}

impl core::fmt::Display for PutawayReceipt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "put away {} units of product {} from receiving area {} into storage area {}",
            self.quantity, self.sku, self.receiving, self.storage
        )
    }
}

/// Stock removed from a storage area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickReceipt {
    pub sku: Sku,
    pub quantity: u64,
    pub location: LocationName,
}

impl core::fmt::Display for PickReceipt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "picked {} units of product {} from storage area {}",
            self.quantity, self.sku, self.location
        )
    }
}

/// Move `qty` of `sku` from a receiving area to a storage area.
///
/// Checks run in order: both locations registered, SKU previously received
/// at the source, enough on hand. Only then is anything written.
pub fn putaway(
    state: &mut LedgerState,
    receiving: &LocationName,
    storage: &LocationName,
    sku: &Sku,
    qty: u64,
) -> DomainResult<PutawayReceipt> {
    let from = LocationRef {
        kind: LocationKind::Receiving,
        name: receiving.clone(),
    };
    let to = LocationRef {
        kind: LocationKind::Storage,
        name: storage.clone(),
    };

    let source = state
        .location(&from)
        .ok_or_else(|| DomainError::location_not_found(LocationKind::Receiving, receiving))?;
    if !state.contains(&to) {
        return Err(DomainError::location_not_found(LocationKind::Storage, storage));
    }
    if !source.has_entry(sku) {
        return Err(DomainError::sku_not_present(sku, LocationKind::Receiving, receiving));
    }

    ensure_positive(qty)?;
    let available = source.quantity(sku);
    if qty > available {
        return Err(DomainError::insufficient_stock(format!(
            "Insufficient quantity to putaway sku {sku} from receiving area {receiving} \
             into storage area {storage}. Requested: {qty}, Available: {available}"
        )));
    }

    state.transfer(&from, &to, sku, qty)?;

    Ok(PutawayReceipt {
        sku: sku.clone(),
        quantity: qty,
        receiving: receiving.clone(),
        storage: storage.clone(),
    })
}

/// Choose the storage area to pick from.
///
/// Among storage areas holding at least `qty` (and a non-zero amount), the
/// one with the smallest on-hand wins; equal amounts keep the earlier
/// registered area. `None` if no single area can cover the request.
pub fn select_pick_location(state: &LedgerState, sku: &Sku, qty: u64) -> Option<LocationName> {
    let mut best: Option<(&LocationName, u64)> = None;

    for stock in state.locations(LocationKind::Storage) {
        if !stock.has_entry(sku) {
            continue;
        }
        let on_hand = stock.quantity(sku);
        if on_hand == 0 || on_hand < qty {
            continue;
        }
        match best {
            Some((_, lowest)) if on_hand >= lowest => {}
            _ => best = Some((stock.name(), on_hand)),
        }
    }

    best.map(|(name, _)| name.clone())
}

/// Remove `qty` of `sku` from the selected storage area.
///
/// A request no single area can cover fails; it is never split.
pub fn pick(state: &mut LedgerState, sku: &Sku, qty: u64) -> DomainResult<PickReceipt> {
    ensure_positive(qty)?;

    let Some(location) = select_pick_location(state, sku, qty) else {
        return Err(DomainError::insufficient_stock(format!(
            "Failed to pick {qty} units of sku {sku}, ensure sufficient inventory"
        )));
    };

    state.debit(
        &LocationRef {
            kind: LocationKind::Storage,
            name: location.clone(),
        },
        sku,
        qty,
    )?;

    Ok(PickReceipt {
        sku: sku.clone(),
        quantity: qty,
        location,
    })
}
