//! Users backend library modules.
//!
//! Hexagonal layout: `domain` holds the user model, service and ports;
//! `inbound` adapts HTTP requests onto the driving ports; `outbound`
//! implements the repository port over PostgreSQL or process memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
