//! Pets service library: domain, HTTP and persistence adapters.
//!
//! The binary in `main.rs` wires these together; tests drive them directly.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
