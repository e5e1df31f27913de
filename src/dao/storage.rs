use std::error::Error;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::state::pool::Collection;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying transport.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}

/// Abstraction over the remote endpoint holding the whole collection.
///
/// The document is an opaque unit: `load` reads it wholesale and `save`
/// overwrites it wholesale. There is no partial update, no versioning, and
/// no conflict detection; the last writer wins.
pub trait DocumentStore: Send + Sync {
    /// Fetch the entire persisted collection.
    fn load(&self) -> BoxFuture<'static, StorageResult<Collection>>;
    /// Overwrite the entire persisted collection.
    fn save(&self, collection: Collection) -> BoxFuture<'static, StorageResult<()>>;
}
