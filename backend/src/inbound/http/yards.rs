//! Yard HTTP handlers, including motorcycle check-in and check-out.
//!
//! ```text
//! GET    /api/v1/yards
//! GET    /api/v1/yards/filter
//! GET    /api/v1/yards/paged
//! GET    /api/v1/yards/{id}
//! POST   /api/v1/yards
//! PUT    /api/v1/yards/{id}
//! DELETE /api/v1/yards/{id}
//! POST   /api/v1/yards/{id}/motorcycles/{motorcycleId}
//! DELETE /api/v1/yards/{id}/motorcycles/{motorcycleId}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::{Paged, SortDir};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::{YardPage, YardSortField};
use crate::domain::{Address, DomainError, Motorcycle, Yard};
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::paging::{PageParams, PagedSchema, page_links};
use crate::inbound::http::state::HttpState;

/// Address fields of a yard payload.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct AddressRequest {
    /// Street line.
    pub street: String,
    /// City name.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
}

impl TryFrom<AddressRequest> for Address {
    type Error = DomainError;

    fn try_from(payload: AddressRequest) -> Result<Self, Self::Error> {
        Address::new(payload.street, payload.city, payload.postal_code).map_err(DomainError::from)
    }
}

/// Request payload for creating or updating a yard.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct YardRequest {
    /// Display name.
    pub name: String,
    /// Postal address.
    pub address: AddressRequest,
    /// Maximum number of motorcycles the yard holds.
    pub capacity: i32,
}

/// Address fields of a yard response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    /// Street line.
    pub street: String,
    /// City name.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
}

impl From<&Address> for AddressResponse {
    fn from(address: &Address) -> Self {
        Self {
            street: address.street().to_owned(),
            city: address.city().to_owned(),
            postal_code: address.postal_code().to_owned(),
        }
    }
}

/// Response projection of a yard.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YardResponse {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Postal address.
    pub address: AddressResponse,
    /// Maximum number of motorcycles the yard holds.
    pub capacity: i32,
    /// Motorcycles currently checked in.
    pub occupancy: usize,
    /// Ids of the motorcycles currently checked in.
    pub motorcycle_ids: Vec<Uuid>,
}

impl From<Yard> for YardResponse {
    fn from(yard: Yard) -> Self {
        Self {
            id: yard.id(),
            name: yard.name().to_owned(),
            address: yard.address().into(),
            capacity: yard.capacity(),
            occupancy: yard.occupancy(),
            motorcycle_ids: yard.motorcycle_ids().to_vec(),
        }
    }
}

/// Filter parameters from the first API generation.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct YardFilterParams {
    /// Case-insensitive name substring.
    pub name: Option<String>,
    /// Case-insensitive city substring.
    pub city: Option<String>,
    /// Keep only yards with at least this capacity.
    pub min_capacity: Option<i32>,
}

async fn load_yard(state: &HttpState, id: Uuid) -> Result<Yard, DomainError> {
    state
        .yards
        .find(id)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| DomainError::not_found("yard not found"))
}

async fn load_motorcycle(state: &HttpState, id: Uuid) -> Result<Motorcycle, DomainError> {
    state
        .motorcycles
        .find(id)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| DomainError::not_found("motorcycle not found"))
}

/// List every yard.
#[utoipa::path(
    get,
    path = "/api/v1/yards",
    responses(
        (status = 200, description = "All yards", body = [YardResponse]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["yards"],
    operation_id = "listYards"
)]
#[get("/yards")]
pub async fn list_yards(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<YardResponse>>> {
    let yards = state.yards.list().await.map_err(DomainError::from)?;
    Ok(web::Json(yards.into_iter().map(YardResponse::from).collect()))
}

/// Filter yards by name, city, or minimum capacity.
#[utoipa::path(
    get,
    path = "/api/v1/yards/filter",
    params(YardFilterParams),
    responses(
        (status = 200, description = "Matching yards", body = [YardResponse]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["yards"],
    operation_id = "filterYards"
)]
#[get("/yards/filter")]
pub async fn filter_yards(
    state: web::Data<HttpState>,
    params: web::Query<YardFilterParams>,
) -> ApiResult<web::Json<Vec<YardResponse>>> {
    let yards = state.yards.list().await.map_err(DomainError::from)?;
    let matches = yards
        .into_iter()
        .filter(|y| {
            params
                .name
                .as_deref()
                .is_none_or(|name| y.name().to_lowercase().contains(&name.to_lowercase()))
        })
        .filter(|y| {
            params.city.as_deref().is_none_or(|city| {
                y.address().city().to_lowercase().contains(&city.to_lowercase())
            })
        })
        .filter(|y| params.min_capacity.is_none_or(|min| y.capacity() >= min))
        .map(YardResponse::from)
        .collect();
    Ok(web::Json(matches))
}

/// Paginated, searchable, sortable yard listing.
///
/// Sort fields: `name` (default), `capacity`, `id`; direction defaults to
/// ascending. The search term matches name, street, city, and postal code.
#[utoipa::path(
    get,
    path = "/api/v1/yards/paged",
    params(PageParams),
    responses(
        (status = 200, description = "One page of yards", body = PagedSchema),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["yards"],
    operation_id = "pageYards"
)]
#[get("/yards/paged")]
pub async fn page_yards(
    state: web::Data<HttpState>,
    req: HttpRequest,
    params: web::Query<PageParams>,
) -> ApiResult<HttpResponse> {
    let query = YardPage {
        request: params.request(),
        search: params.search(),
        sort_by: YardSortField::parse(params.sort_by.as_deref()),
        direction: params.direction_or(SortDir::Asc),
    };
    let result = state.yards.page(query).await.map_err(DomainError::from)?;
    let links = page_links(&req, &params, &result);
    Ok(HttpResponse::Ok().json(Paged::new(result.map(YardResponse::from), links)))
}

/// Fetch one yard by id.
#[utoipa::path(
    get,
    path = "/api/v1/yards/{id}",
    params(("id" = Uuid, Path, description = "Yard identifier")),
    responses(
        (status = 200, description = "The yard", body = YardResponse),
        (status = 404, description = "Unknown id", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["yards"],
    operation_id = "getYard"
)]
#[get("/yards/{id}")]
pub async fn get_yard(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<YardResponse>> {
    let yard = load_yard(&state, *id).await?;
    Ok(web::Json(yard.into()))
}

/// Create a yard.
#[utoipa::path(
    post,
    path = "/api/v1/yards",
    request_body = YardRequest,
    responses(
        (status = 201, description = "Created", body = YardResponse),
        (status = 400, description = "Validation failure", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["yards"],
    operation_id = "createYard"
)]
#[post("/yards")]
pub async fn create_yard(
    state: web::Data<HttpState>,
    payload: web::Json<YardRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let address = Address::try_from(payload.address)?;
    let yard = Yard::new(payload.name, address, payload.capacity).map_err(DomainError::from)?;
    state.yards.add(&yard).await.map_err(DomainError::from)?;
    Ok(HttpResponse::Created().json(YardResponse::from(yard)))
}

/// Update a yard's name, address, and capacity.
///
/// Shrinking capacity below the current occupancy is rejected with a
/// conflict.
#[utoipa::path(
    put,
    path = "/api/v1/yards/{id}",
    params(("id" = Uuid, Path, description = "Yard identifier")),
    request_body = YardRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Validation failure", body = ApiError),
        (status = 404, description = "Unknown id", body = ApiError),
        (status = 409, description = "Capacity below occupancy", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["yards"],
    operation_id = "updateYard"
)]
#[put("/yards/{id}")]
pub async fn update_yard(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<YardRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let address = Address::try_from(payload.address)?;
    let mut yard = load_yard(&state, *id).await?;
    yard.update(payload.name, address, payload.capacity)
        .map_err(DomainError::from)?;
    state.yards.update(&yard).await.map_err(DomainError::from)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a yard.
#[utoipa::path(
    delete,
    path = "/api/v1/yards/{id}",
    params(("id" = Uuid, Path, description = "Yard identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown id", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["yards"],
    operation_id = "deleteYard"
)]
#[delete("/yards/{id}")]
pub async fn delete_yard(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let removed = state.yards.remove(*id).await.map_err(DomainError::from)?;
    if !removed {
        return Err(DomainError::not_found("yard not found").into());
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Check a motorcycle in at this yard.
///
/// Re-checking a motorcycle already in this yard is a no-op success. A full
/// yard, a motorcycle assigned elsewhere, or one in maintenance is a
/// conflict.
#[utoipa::path(
    post,
    path = "/api/v1/yards/{id}/motorcycles/{motorcycleId}",
    params(
        ("id" = Uuid, Path, description = "Yard identifier"),
        ("motorcycleId" = Uuid, Path, description = "Motorcycle identifier")
    ),
    responses(
        (status = 200, description = "Checked in", body = YardResponse),
        (status = 404, description = "Unknown yard or motorcycle", body = ApiError),
        (status = 409, description = "Transition conflict", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["yards"],
    operation_id = "checkInMotorcycle"
)]
#[post("/yards/{id}/motorcycles/{motorcycle_id}")]
pub async fn check_in_motorcycle(
    state: web::Data<HttpState>,
    path: web::Path<(Uuid, Uuid)>,
) -> ApiResult<web::Json<YardResponse>> {
    let (yard_id, motorcycle_id) = path.into_inner();
    let mut yard = load_yard(&state, yard_id).await?;
    let mut moto = load_motorcycle(&state, motorcycle_id).await?;

    yard.check_in(&mut moto).map_err(DomainError::from)?;
    state
        .motorcycles
        .update(&moto)
        .await
        .map_err(DomainError::from)?;
    Ok(web::Json(yard.into()))
}

/// Check a motorcycle out of this yard.
///
/// A motorcycle that is not in this yard leaves the yard untouched.
#[utoipa::path(
    delete,
    path = "/api/v1/yards/{id}/motorcycles/{motorcycleId}",
    params(
        ("id" = Uuid, Path, description = "Yard identifier"),
        ("motorcycleId" = Uuid, Path, description = "Motorcycle identifier")
    ),
    responses(
        (status = 200, description = "Checked out (or was not checked in)", body = YardResponse),
        (status = 404, description = "Unknown yard or motorcycle", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["yards"],
    operation_id = "checkOutMotorcycle"
)]
#[delete("/yards/{id}/motorcycles/{motorcycle_id}")]
pub async fn check_out_motorcycle(
    state: web::Data<HttpState>,
    path: web::Path<(Uuid, Uuid)>,
) -> ApiResult<web::Json<YardResponse>> {
    let (yard_id, motorcycle_id) = path.into_inner();
    let mut yard = load_yard(&state, yard_id).await?;
    let mut moto = load_motorcycle(&state, motorcycle_id).await?;

    yard.check_out(&mut moto);
    state
        .motorcycles
        .update(&moto)
        .await
        .map_err(DomainError::from)?;
    Ok(web::Json(yard.into()))
}
