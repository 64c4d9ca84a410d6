//! Blog backend library.
//!
//! Hexagonal layout: [`domain`] holds entities, the authorization policy,
//! services and ports; [`inbound::http`] adapts Actix requests to the
//! driving ports; [`outbound`] implements the driven ports over PostgreSQL,
//! memory, Argon2 and the log.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
