//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Business constraint violated (unique keys and the like).
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Why a generation request to the inference backend did not produce a body.
///
/// Closed set: every runtime failure of the backend call lands in exactly one
/// variant, and the dialogue layer maps each one to display text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    #[error("Inference request timed out")]
    Timeout,

    #[error("Inference backend unreachable: {0}")]
    Connection(String),

    /// Status 500 whose body mentions memory.
    #[error("Inference backend ran out of memory")]
    OutOfMemory,

    /// Status 500 whose body reports a terminated model process.
    #[error("Inference model process crashed")]
    ProcessCrashed,

    /// Any other status 500.
    #[error("Inference backend internal error")]
    Internal,

    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    #[error("Inference backend returned status {0}")]
    Status(u16),

    #[error("Inference transport error: {0}")]
    Transport(String),

    #[error("Unexpected inference error: {0}")]
    Unexpected(String),
}

impl InferenceError {
    /// Classify a non-200 response by status and body text.
    pub fn from_status(status: u16, body: &str, model: &str) -> Self {
        match status {
            500 => {
                let body = body.to_lowercase();
                if body.contains("memory") {
                    Self::OutOfMemory
                } else if body.contains("terminated") || body.contains("exit status") {
                    Self::ProcessCrashed
                } else {
                    Self::Internal
                }
            }
            404 => Self::ModelNotFound {
                model: model.to_string(),
            },
            other => Self::Status(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_body_keywords_select_the_cause() {
        assert_eq!(
            InferenceError::from_status(500, "model requires more system MEMORY", "m"),
            InferenceError::OutOfMemory
        );
        assert_eq!(
            InferenceError::from_status(500, "llama runner process has terminated", "m"),
            InferenceError::ProcessCrashed
        );
        assert_eq!(
            InferenceError::from_status(500, "runner failed: exit status 2", "m"),
            InferenceError::ProcessCrashed
        );
        assert_eq!(
            InferenceError::from_status(500, "boom", "m"),
            InferenceError::Internal
        );
    }

    #[test]
    fn other_statuses_are_not_inspected() {
        assert_eq!(
            InferenceError::from_status(404, "memory", "phi3:mini"),
            InferenceError::ModelNotFound {
                model: "phi3:mini".to_string()
            }
        );
        assert_eq!(
            InferenceError::from_status(503, "out of memory", "m"),
            InferenceError::Status(503)
        );
    }
}
