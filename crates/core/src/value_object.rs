//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity; they are defined entirely by their
/// attribute values and are immutable once built.
///
/// - **Value Object**: `Sku("A123")`, a pick task `(A123, 5)`
/// - **Entity**: a storage area named `S1`, whose contents change over time
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
