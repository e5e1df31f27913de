//! Error types shared by the HTTP document-store implementation.

use reqwest::StatusCode;
use thiserror::Error;

use crate::dao::storage::StorageError;

/// Convenient result alias returning [`RemoteError`] failures.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failures that can occur while talking to the document endpoint.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Required environment variable is missing.
    #[error("missing document store environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the missing variable.
        var: &'static str,
    },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build document store client")]
    ClientBuilder {
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
    /// A request to the endpoint could not be sent.
    #[error("failed to send request to `{url}`")]
    RequestSend {
        /// Target URL.
        url: String,
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
    /// The endpoint returned a non-success status code.
    #[error("unexpected response status {status} from `{url}`")]
    RequestStatus {
        /// Target URL.
        url: String,
        /// HTTP status received.
        status: StatusCode,
    },
    /// Response payload could not be parsed into the collection document.
    #[error("failed to decode document from `{url}`")]
    DecodeResponse {
        /// Target URL.
        url: String,
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
}

impl From<RemoteError> for StorageError {
    fn from(err: RemoteError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
