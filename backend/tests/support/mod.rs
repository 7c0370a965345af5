//! Shared harness for the HTTP integration tests.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, Error, test, web};
use serde_json::{Value, json};

use motoyard::Trace;
use motoyard::inbound::http::state::HttpState;
use motoyard::server::configure_api;

/// Bound satisfied by the service `test::init_service` yields for this app.
pub trait TestService: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {}

impl<T> TestService for T where
    T: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>
{
}

/// Build the full route tree over a fresh in-memory store.
pub async fn test_app() -> impl TestService {
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::in_memory()))
            .wrap(Trace)
            .configure(configure_api),
    )
    .await
}

/// POST a JSON body, asserting the expected status, returning the response
/// body when there is one.
pub async fn post_json(
    app: &impl TestService,
    path: &str,
    body: Value,
    expected_status: u16,
) -> Value {
    let req = test::TestRequest::post()
        .uri(path)
        .set_json(body)
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status().as_u16(), expected_status, "POST {path}");
    read_json_or_null(res).await
}

/// GET a path, asserting the expected status, returning the body.
pub async fn get_json(app: &impl TestService, path: &str, expected_status: u16) -> Value {
    let req = test::TestRequest::get().uri(path).to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status().as_u16(), expected_status, "GET {path}");
    read_json_or_null(res).await
}

async fn read_json_or_null(res: ServiceResponse<BoxBody>) -> Value {
    let bytes = test::read_body(res).await;
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// Payload for registering a motorcycle.
pub fn motorcycle_body(plate: &str, brand: &str, year: i32) -> Value {
    json!({
        "plate": plate,
        "model": "CG 160",
        "brand": brand,
        "rfidTag": format!("RF-{plate}"),
        "year": year,
    })
}

/// Payload for creating a yard.
pub fn yard_body(name: &str, city: &str, capacity: i32) -> Value {
    json!({
        "name": name,
        "address": { "street": "Rua Azul 10", "city": city, "postalCode": "01310-100" },
        "capacity": capacity,
    })
}
