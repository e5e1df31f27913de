//! Persistence layer: the document-store abstraction and its backends.

#[cfg(feature = "http-store")]
/// reqwest-backed client for the remote JSON document endpoint.
pub mod http;
/// In-memory backend for tests and offline hosts.
pub mod memory;
/// Storage abstraction shared by every backend.
pub mod storage;
