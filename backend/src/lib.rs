//! Rental listing backend.
//!
//! The crate follows a hexagonal layout: `domain` holds the listing model,
//! ports and services; `inbound` adapts HTTP onto the driving ports;
//! `outbound` implements the driven ports over PostgreSQL or memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
