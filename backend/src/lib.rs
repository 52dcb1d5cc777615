//! wellf backend library: household records behind a REST/JSON API.
//!
//! Layout follows ports and adapters: [`domain`] holds entities, validation
//! and the port traits; [`inbound::http`] exposes them over actix-web;
//! [`outbound::persistence`] implements the ports on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
