//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every REST endpoint and the response schemas.
//! Swagger UI serves the generated document at `/docs` in debug builds.

use utoipa::OpenApi;

use crate::domain::{ErrorCode, MotorcycleStatus};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::motorcycles::{MotorcycleRequest, MotorcycleResponse, ProblemRequest};
use crate::inbound::http::paging::{PageMetaSchema, PagedSchema};
use crate::inbound::http::users::{UserRequest, UserResponse};
use crate::inbound::http::yards::{AddressRequest, AddressResponse, YardRequest, YardResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Motoyard API",
        description = "Fleet, yard, and user management with paginated, linkable listings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::motorcycles::list_motorcycles,
        crate::inbound::http::motorcycles::filter_motorcycles,
        crate::inbound::http::motorcycles::page_motorcycles,
        crate::inbound::http::motorcycles::get_motorcycle,
        crate::inbound::http::motorcycles::create_motorcycle,
        crate::inbound::http::motorcycles::update_motorcycle,
        crate::inbound::http::motorcycles::delete_motorcycle,
        crate::inbound::http::motorcycles::report_problem,
        crate::inbound::http::motorcycles::resolve_problem,
        crate::inbound::http::yards::list_yards,
        crate::inbound::http::yards::filter_yards,
        crate::inbound::http::yards::page_yards,
        crate::inbound::http::yards::get_yard,
        crate::inbound::http::yards::create_yard,
        crate::inbound::http::yards::update_yard,
        crate::inbound::http::yards::delete_yard,
        crate::inbound::http::yards::check_in_motorcycle,
        crate::inbound::http::yards::check_out_motorcycle,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::page_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        MotorcycleStatus,
        MotorcycleRequest,
        MotorcycleResponse,
        ProblemRequest,
        AddressRequest,
        AddressResponse,
        YardRequest,
        YardResponse,
        UserRequest,
        UserResponse,
        PagedSchema,
        PageMetaSchema,
    )),
    tags(
        (name = "motorcycles", description = "Fleet registration and status"),
        (name = "yards", description = "Yards and motorcycle check-in/check-out"),
        (name = "users", description = "User accounts"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_contains_the_paged_listings() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        assert!(paths.contains(&"/api/v1/motorcycles/paged".to_owned()));
        assert!(paths.contains(&"/api/v1/yards/paged".to_owned()));
        assert!(paths.contains(&"/api/v1/users/paged".to_owned()));
    }

    #[test]
    fn document_registers_the_error_schema() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.schemas.contains_key("ApiError"));
    }
}
