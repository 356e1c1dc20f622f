//! `stockflow-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod log;
pub mod outcome;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, ensure_positive};
pub use id::{LocationKind, LocationName, OrderId, Sku};
pub use log::{LogLevel, LogSink};
pub use outcome::Outcome;
pub use value_object::ValueObject;
