//! Motoyard backend library.
//!
//! Fleet, yard, and user management behind a REST API: domain entities with
//! validating constructors and transition methods, repository ports with
//! Diesel and in-memory adapters, and paginated listings with navigation
//! links.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-tracing middleware.
pub use middleware::Trace;
