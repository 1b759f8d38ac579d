//! Engine error taxonomy.
//!
//! Every public operation returns `Result<T, EngineError>`. Callers match on
//! the variant (or on `code()` when the error crosses a serialization
//! boundary); raw panics or unwraps never cross the engine boundary.

use thiserror::Error;

/// Convenience alias for engine operation results.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors produced by the post/reaction/follow engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed or out-of-range input (bad page size, self-follow, ...).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A referenced account/post/language/type is missing, inactive,
    /// or soft-deleted.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The operation conflicts with existing state (duplicate active follow).
    #[error("Conflict: {0}")]
    Conflict(&'static str),

    /// Unexpected storage failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other unexpected fault caught at the boundary.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl EngineError {
    /// Machine-readable error code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "validation",
            EngineError::NotFound(_) => "not_found",
            EngineError::Conflict(_) => "conflict",
            EngineError::Database(_) | EngineError::Internal(_) => "internal",
        }
    }

    /// Shorthand for building a validation error from anything displayable.
    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }
}
