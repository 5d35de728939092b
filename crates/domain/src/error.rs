//! Unified error types for the domain layer

use thiserror::Error;

use crate::value_objects::PartSlot;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A part value that is not in the catalog for its slot
    #[error("Unknown {slot} part: {value}")]
    UnknownPart { slot: PartSlot, value: String },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unknown_part(slot: PartSlot, value: impl Into<String>) -> Self {
        Self::UnknownPart {
            slot,
            value: value.into(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
