//! Domain error model.

use thiserror::Error;

use crate::id::{LocationKind, LocationName, Sku};

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable and local to the call that produced it. The
/// `Display` text is the human-readable message handed back to callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Duplicate registration of a product or location.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// Reference to an unregistered receiving or storage area.
    #[error("{kind} area does not exist: {name}")]
    LocationNotFound { kind: LocationKind, name: LocationName },

    /// The SKU has no entry at the source location.
    #[error("product sku {sku} does not exist in {kind} area {location}")]
    SkuNotPresent {
        sku: Sku,
        kind: LocationKind,
        location: LocationName,
    },

    /// Requested quantity exceeds what the relevant scope holds.
    #[error("{0}")]
    InsufficientStock(String),

    /// Quantities moved through the ledger must be positive.
    #[error("quantity must be a positive integer, got {0}")]
    InvalidQuantity(u64),

    /// An order was asked to move to a state its lifecycle does not allow.
    #[error("invalid order transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

impl DomainError {
    pub fn already_exists(what: impl Into<String>) -> Self {
        Self::AlreadyExists(what.into())
    }

    pub fn location_not_found(kind: LocationKind, name: &LocationName) -> Self {
        Self::LocationNotFound {
            kind,
            name: name.clone(),
        }
    }

    pub fn sku_not_present(sku: &Sku, kind: LocationKind, location: &LocationName) -> Self {
        Self::SkuNotPresent {
            sku: sku.clone(),
            kind,
            location: location.clone(),
        }
    }

    pub fn insufficient_stock(msg: impl Into<String>) -> Self {
        Self::InsufficientStock(msg.into())
    }

    pub fn invalid_transition(from: impl core::fmt::Display, to: impl core::fmt::Display) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Stable machine-readable code (used by the HTTP layer).
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::AlreadyExists(_) => "already_exists",
            DomainError::LocationNotFound { .. } => "location_not_found",
            DomainError::SkuNotPresent { .. } => "sku_not_present",
            DomainError::InsufficientStock(_) => "insufficient_stock",
            DomainError::InvalidQuantity(_) => "invalid_quantity",
            DomainError::InvalidTransition { .. } => "invalid_transition",
        }
    }
}

/// Reject zero quantities before they reach the ledger.
pub fn ensure_positive(qty: u64) -> DomainResult<u64> {
    if qty == 0 {
        return Err(DomainError::InvalidQuantity(qty));
    }
    Ok(qty)
}
