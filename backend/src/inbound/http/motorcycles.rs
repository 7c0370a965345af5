//! Motorcycle HTTP handlers.
//!
//! ```text
//! GET    /api/v1/motorcycles
//! GET    /api/v1/motorcycles/filter
//! GET    /api/v1/motorcycles/paged
//! GET    /api/v1/motorcycles/{id}
//! POST   /api/v1/motorcycles
//! PUT    /api/v1/motorcycles/{id}
//! DELETE /api/v1/motorcycles/{id}
//! POST   /api/v1/motorcycles/{id}/problem
//! DELETE /api/v1/motorcycles/{id}/problem
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::{Paged, SortDir};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::{MotorcyclePage, MotorcycleSortField};
use crate::domain::{DomainError, Motorcycle, MotorcycleDraft, MotorcycleStatus};
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::paging::{PageParams, PagedSchema, page_links};
use crate::inbound::http::state::HttpState;

/// Request payload for registering or updating a motorcycle.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct MotorcycleRequest {
    /// Plate in either accepted format.
    pub plate: String,
    /// Model name.
    pub model: String,
    /// Brand name.
    pub brand: String,
    /// RFID tag attached to the vehicle.
    pub rfid_tag: String,
    /// Model year.
    pub year: i32,
    /// Optional open problem note.
    pub problem: Option<String>,
    /// Optional free-text location hint.
    pub location: Option<String>,
}

impl From<MotorcycleRequest> for MotorcycleDraft {
    fn from(payload: MotorcycleRequest) -> Self {
        Self {
            plate: payload.plate,
            model: payload.model,
            brand: payload.brand,
            rfid_tag: payload.rfid_tag,
            year: payload.year,
            problem: payload.problem,
            location: payload.location,
        }
    }
}

/// Response projection of a motorcycle.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MotorcycleResponse {
    /// Unique identifier.
    pub id: Uuid,
    /// Normalised plate text.
    pub plate: String,
    /// Model name.
    pub model: String,
    /// Brand name.
    pub brand: String,
    /// RFID tag.
    pub rfid_tag: String,
    /// Model year.
    pub year: i32,
    /// Registration timestamp, ISO 8601.
    pub registered_at: String,
    /// Open problem note, if any.
    pub problem: Option<String>,
    /// Free-text location hint, if any.
    pub location: Option<String>,
    /// Fleet status.
    pub status: MotorcycleStatus,
    /// Yard holding the motorcycle, when checked in.
    pub yard_id: Option<Uuid>,
}

impl From<Motorcycle> for MotorcycleResponse {
    fn from(moto: Motorcycle) -> Self {
        Self {
            id: moto.id(),
            plate: moto.plate().to_string(),
            model: moto.model().to_owned(),
            brand: moto.brand().to_owned(),
            rfid_tag: moto.rfid_tag().to_owned(),
            year: moto.year(),
            registered_at: moto.registered_at().to_rfc3339(),
            problem: moto.problem().map(str::to_owned),
            location: moto.location().map(str::to_owned),
            status: moto.status(),
            yard_id: moto.yard_id(),
        }
    }
}

/// Filter parameters from the first API generation.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MotorcycleFilterParams {
    /// Fleet status in its stable string form.
    pub status: Option<String>,
    /// Case-insensitive brand substring.
    pub brand: Option<String>,
    /// Exact model year.
    pub year: Option<i32>,
}

/// Request payload for reporting a problem.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ProblemRequest {
    /// Description of the problem.
    pub note: String,
}

async fn load(state: &HttpState, id: Uuid) -> Result<Motorcycle, DomainError> {
    state
        .motorcycles
        .find(id)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| DomainError::not_found("motorcycle not found"))
}

/// List every registered motorcycle.
#[utoipa::path(
    get,
    path = "/api/v1/motorcycles",
    responses(
        (status = 200, description = "All motorcycles", body = [MotorcycleResponse]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["motorcycles"],
    operation_id = "listMotorcycles"
)]
#[get("/motorcycles")]
pub async fn list_motorcycles(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<MotorcycleResponse>>> {
    let motorcycles = state.motorcycles.list().await.map_err(DomainError::from)?;
    Ok(web::Json(
        motorcycles.into_iter().map(MotorcycleResponse::from).collect(),
    ))
}

/// Filter motorcycles by status, brand, or year.
#[utoipa::path(
    get,
    path = "/api/v1/motorcycles/filter",
    params(MotorcycleFilterParams),
    responses(
        (status = 200, description = "Matching motorcycles", body = [MotorcycleResponse]),
        (status = 400, description = "Invalid status value", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["motorcycles"],
    operation_id = "filterMotorcycles"
)]
#[get("/motorcycles/filter")]
pub async fn filter_motorcycles(
    state: web::Data<HttpState>,
    params: web::Query<MotorcycleFilterParams>,
) -> ApiResult<web::Json<Vec<MotorcycleResponse>>> {
    let status = params
        .status
        .as_deref()
        .map(|value| {
            MotorcycleStatus::parse(value).ok_or_else(|| {
                DomainError::invalid_request("status must be available, in_use, or in_maintenance")
                    .with_details(json!({ "field": "status", "value": value }))
            })
        })
        .transpose()?;

    let motorcycles = state.motorcycles.list().await.map_err(DomainError::from)?;
    let matches = motorcycles
        .into_iter()
        .filter(|m| status.is_none_or(|wanted| m.status() == wanted))
        .filter(|m| {
            params.brand.as_deref().is_none_or(|brand| {
                m.brand().to_lowercase().contains(&brand.to_lowercase())
            })
        })
        .filter(|m| params.year.is_none_or(|year| m.year() == year))
        .map(MotorcycleResponse::from)
        .collect();
    Ok(web::Json(matches))
}

/// Paginated, searchable, sortable motorcycle listing.
///
/// Sort fields: `plate`, `model`, `brand`, `year`, `status`, `registeredAt`
/// (default, also accepted as `datacadastro`); unrecognised values fall back
/// to the default. Direction defaults to descending.
#[utoipa::path(
    get,
    path = "/api/v1/motorcycles/paged",
    params(PageParams),
    responses(
        (status = 200, description = "One page of motorcycles", body = PagedSchema),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["motorcycles"],
    operation_id = "pageMotorcycles"
)]
#[get("/motorcycles/paged")]
pub async fn page_motorcycles(
    state: web::Data<HttpState>,
    req: HttpRequest,
    params: web::Query<PageParams>,
) -> ApiResult<HttpResponse> {
    let query = MotorcyclePage {
        request: params.request(),
        search: params.search(),
        sort_by: MotorcycleSortField::parse(params.sort_by.as_deref()),
        direction: params.direction_or(SortDir::Desc),
    };
    let result = state
        .motorcycles
        .page(query)
        .await
        .map_err(DomainError::from)?;
    let links = page_links(&req, &params, &result);
    Ok(HttpResponse::Ok().json(Paged::new(result.map(MotorcycleResponse::from), links)))
}

/// Fetch one motorcycle by id.
#[utoipa::path(
    get,
    path = "/api/v1/motorcycles/{id}",
    params(("id" = Uuid, Path, description = "Motorcycle identifier")),
    responses(
        (status = 200, description = "The motorcycle", body = MotorcycleResponse),
        (status = 404, description = "Unknown id", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["motorcycles"],
    operation_id = "getMotorcycle"
)]
#[get("/motorcycles/{id}")]
pub async fn get_motorcycle(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<MotorcycleResponse>> {
    let moto = load(&state, *id).await?;
    Ok(web::Json(moto.into()))
}

/// Register a new motorcycle.
#[utoipa::path(
    post,
    path = "/api/v1/motorcycles",
    request_body = MotorcycleRequest,
    responses(
        (status = 201, description = "Registered", body = MotorcycleResponse),
        (status = 400, description = "Validation failure", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["motorcycles"],
    operation_id = "createMotorcycle"
)]
#[post("/motorcycles")]
pub async fn create_motorcycle(
    state: web::Data<HttpState>,
    payload: web::Json<MotorcycleRequest>,
) -> ApiResult<HttpResponse> {
    let moto = Motorcycle::register(payload.into_inner().into()).map_err(DomainError::from)?;
    state.motorcycles.add(&moto).await.map_err(DomainError::from)?;
    Ok(HttpResponse::Created().json(MotorcycleResponse::from(moto)))
}

/// Update a motorcycle's registration data.
#[utoipa::path(
    put,
    path = "/api/v1/motorcycles/{id}",
    params(("id" = Uuid, Path, description = "Motorcycle identifier")),
    request_body = MotorcycleRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Validation failure", body = ApiError),
        (status = 404, description = "Unknown id", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["motorcycles"],
    operation_id = "updateMotorcycle"
)]
#[put("/motorcycles/{id}")]
pub async fn update_motorcycle(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<MotorcycleRequest>,
) -> ApiResult<HttpResponse> {
    let mut moto = load(&state, *id).await?;
    moto.update(payload.into_inner().into())
        .map_err(DomainError::from)?;
    state
        .motorcycles
        .update(&moto)
        .await
        .map_err(DomainError::from)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a motorcycle.
#[utoipa::path(
    delete,
    path = "/api/v1/motorcycles/{id}",
    params(("id" = Uuid, Path, description = "Motorcycle identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown id", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["motorcycles"],
    operation_id = "deleteMotorcycle"
)]
#[delete("/motorcycles/{id}")]
pub async fn delete_motorcycle(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let removed = state
        .motorcycles
        .remove(*id)
        .await
        .map_err(DomainError::from)?;
    if !removed {
        return Err(DomainError::not_found("motorcycle not found").into());
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Report a problem, moving the motorcycle into maintenance.
#[utoipa::path(
    post,
    path = "/api/v1/motorcycles/{id}/problem",
    params(("id" = Uuid, Path, description = "Motorcycle identifier")),
    request_body = ProblemRequest,
    responses(
        (status = 200, description = "Problem recorded", body = MotorcycleResponse),
        (status = 400, description = "Blank note", body = ApiError),
        (status = 404, description = "Unknown id", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["motorcycles"],
    operation_id = "reportMotorcycleProblem"
)]
#[post("/motorcycles/{id}/problem")]
pub async fn report_problem(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<ProblemRequest>,
) -> ApiResult<web::Json<MotorcycleResponse>> {
    let mut moto = load(&state, *id).await?;
    moto.report_problem(payload.into_inner().note)
        .map_err(DomainError::from)?;
    state
        .motorcycles
        .update(&moto)
        .await
        .map_err(DomainError::from)?;
    Ok(web::Json(moto.into()))
}

/// Resolve the open problem, restoring the assignment-implied status.
#[utoipa::path(
    delete,
    path = "/api/v1/motorcycles/{id}/problem",
    params(("id" = Uuid, Path, description = "Motorcycle identifier")),
    responses(
        (status = 200, description = "Problem cleared", body = MotorcycleResponse),
        (status = 404, description = "Unknown id", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["motorcycles"],
    operation_id = "resolveMotorcycleProblem"
)]
#[delete("/motorcycles/{id}/problem")]
pub async fn resolve_problem(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<MotorcycleResponse>> {
    let mut moto = load(&state, *id).await?;
    moto.resolve_problem();
    state
        .motorcycles
        .update(&moto)
        .await
        .map_err(DomainError::from)?;
    Ok(web::Json(moto.into()))
}
