//! Uniform result shape returned to callers of mutating operations.

use serde::{Deserialize, Serialize};

use crate::error::DomainResult;

/// `{ success, message }` as seen by the HTTP layer and other callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl<T: core::fmt::Display> From<DomainResult<T>> for Outcome {
    fn from(result: DomainResult<T>) -> Self {
        match result {
            Ok(v) => Outcome::ok(v.to_string()),
            Err(e) => Outcome::failed(e.to_string()),
        }
    }
}
