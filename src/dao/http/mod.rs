//! HTTP backend for the remote JSON document endpoint.
//!
//! The endpoint is a plain blob store (an npoint-style JSON bin): `GET`
//! returns the whole document, `POST` replaces it. There is no auth handshake
//! beyond optional basic auth and no transaction or conflict support.

mod client;
mod config;
mod error;

pub use client::HttpDocumentStore;
pub use config::EndpointConfig;
pub use error::{RemoteError, RemoteResult};
