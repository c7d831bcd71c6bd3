//! Networking for the Snibox REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` sends requests and maps failures, `types` defines the
//! request/response shapes shared by the services.

pub mod transport;
pub mod types;

pub use transport::{ReqwestTransport, Transport, TransportError};
pub use types::{HttpMethod, Messages, Mutation, RequestSpec, ServerResponse};

#[cfg(test)]
pub use transport::test_helpers;
