//! Error types for task domain parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is not a 64-bit integer.
    #[error("invalid task identifier '{0}', expected an integer")]
    InvalidTaskId(String),
}
