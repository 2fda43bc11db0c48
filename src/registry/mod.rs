//! The template registry client.
//!
//! The registry is the remote service holding published template
//! versions; it is an external collaborator reached only through the
//! [`RegistryClient`] trait. Two implementations ship with the kit:
//!
//! - [`HttpRegistryClient`] - blocking HTTP+JSON transport, archives as
//!   the transfer encoding
//! - [`InMemoryRegistry`] - process-local store for tests and embedding
//!
//! All calls are synchronous from the sync engine's perspective; each is
//! bounded by the configured timeout, and transport failures surface as
//! `RegistryUnavailable` without retries.

pub mod client;
pub mod http;
pub mod memory;

pub use client::{RegistryClient, RemoteEntry};
pub use http::HttpRegistryClient;
pub use memory::InMemoryRegistry;
