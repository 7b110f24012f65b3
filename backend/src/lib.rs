//! Record-keeping backend: students, user accounts and their pets behind a
//! JSON REST API.
//!
//! The crate follows a hexagonal layout. [`domain`] holds the entities,
//! ports and services; [`inbound`] adapts HTTP onto the driving ports and
//! [`outbound`] implements the repository ports in memory or on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
