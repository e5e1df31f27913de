use thiserror::Error;
use validator::ValidationErrors;

use crate::dao::storage::StorageError;

/// Errors that can occur in service layer operations.
///
/// Nothing here is fatal: network failures degrade to a user-visible
/// notification, validation failures block a single mutation, and stale
/// mutation targets are ignored before an error is ever produced.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Remote document store could not be reached.
    #[error("storage unavailable")]
    Unavailable(#[from] StorageError),
    /// The collection has not been loaded yet; mutations are gated until the
    /// initial load resolves.
    #[error("collection not loaded yet")]
    NotLoaded,
    /// Invalid input provided by the caller. The message names the action
    /// that was blocked.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Another participant in the same pool already uses this phone number.
    #[error("a participant with this phone number already exists; edit the existing entry instead")]
    DuplicatePhone,
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::InvalidInput(format!("validation failed: {}", err))
    }
}
