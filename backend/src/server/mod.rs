//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::motorcycles::{
    create_motorcycle, delete_motorcycle, filter_motorcycles, get_motorcycle, list_motorcycles,
    page_motorcycles, report_problem, resolve_problem, update_motorcycle,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{
    create_user, delete_user, get_user, list_users, page_users, update_user,
};
use crate::inbound::http::yards::{
    check_in_motorcycle, check_out_motorcycle, create_yard, delete_yard, filter_yards, get_yard,
    list_yards, page_yards, update_yard,
};
use crate::middleware::Trace;

/// Register the versioned API routes.
///
/// Literal segments (`/filter`, `/paged`) are registered before the `{id}`
/// routes so they are matched as paths, not identifiers. Shared between the
/// server and the integration tests.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(list_motorcycles)
            .service(filter_motorcycles)
            .service(page_motorcycles)
            .service(create_motorcycle)
            .service(report_problem)
            .service(resolve_problem)
            .service(get_motorcycle)
            .service(update_motorcycle)
            .service(delete_motorcycle)
            .service(list_yards)
            .service(filter_yards)
            .service(page_yards)
            .service(create_yard)
            .service(check_in_motorcycle)
            .service(check_out_motorcycle)
            .service(get_yard)
            .service(update_yard)
            .service(delete_yard)
            .service(list_users)
            .service(page_users)
            .service(create_user)
            .service(get_user)
            .service(update_user)
            .service(delete_user),
    );
}

/// Pick the repository wiring: Diesel over the configured pool, or the
/// in-memory store when no database is attached.
fn build_http_state(config: &ServerConfig) -> HttpState {
    config.db_pool.as_ref().map_or_else(
        || {
            warn!("no database configured, serving from the in-memory store");
            HttpState::in_memory()
        },
        HttpState::with_pool,
    )
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    #[cfg_attr(not(debug_assertions), expect(unused_mut, reason = "Swagger UI is debug-only"))]
    let mut app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}

/// Bind and run the HTTP server until shutdown.
///
/// # Errors
/// Returns [`std::io::Error`] when binding or serving fails.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let http_state = web::Data::new(build_http_state(&config));
    let health_state = web::Data::new(HealthState::new());

    let app_health = health_state.clone();
    let app_http = http_state.clone();
    let server = HttpServer::new(move || build_app(app_health.clone(), app_http.clone()))
        .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
