//! User HTTP handlers.
//!
//! ```text
//! GET    /api/v1/users
//! GET    /api/v1/users/paged
//! GET    /api/v1/users/{id}
//! POST   /api/v1/users
//! PUT    /api/v1/users/{id}
//! DELETE /api/v1/users/{id}
//! ```
//!
//! Passwords arrive pre-hashed; responses never echo the stored hash.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::{Paged, SortDir};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{UserPage, UserSortField};
use crate::domain::{DomainError, User, UserDraft};
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::paging::{PageParams, PagedSchema, page_links};
use crate::inbound::http::state::HttpState;

/// Request payload for creating or updating a user.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct UserRequest {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Pre-hashed password material.
    pub password_hash: String,
}

impl From<UserRequest> for UserDraft {
    fn from(payload: UserRequest) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
            password_hash: payload.password_hash,
        }
    }
}

/// Response projection of a user; the password hash stays server-side.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Registration timestamp, ISO 8601.
    pub registered_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            registered_at: user.registered_at().to_rfc3339(),
        }
    }
}

async fn load(state: &HttpState, id: Uuid) -> Result<User, DomainError> {
    state
        .users
        .find(id)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| DomainError::not_found("user not found"))
}

/// List every user.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list().await.map_err(DomainError::from)?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Paginated, searchable, sortable user listing.
///
/// Sort fields: `name`, `email`, `registeredAt` (default); direction
/// defaults to descending. The search term matches name and email.
#[utoipa::path(
    get,
    path = "/api/v1/users/paged",
    params(PageParams),
    responses(
        (status = 200, description = "One page of users", body = PagedSchema),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "pageUsers"
)]
#[get("/users/paged")]
pub async fn page_users(
    state: web::Data<HttpState>,
    req: HttpRequest,
    params: web::Query<PageParams>,
) -> ApiResult<HttpResponse> {
    let query = UserPage {
        request: params.request(),
        search: params.search(),
        sort_by: UserSortField::parse(params.sort_by.as_deref()),
        direction: params.direction_or(SortDir::Desc),
    };
    let result = state.users.page(query).await.map_err(DomainError::from)?;
    let links = page_links(&req, &params, &result);
    Ok(HttpResponse::Ok().json(Paged::new(result.map(UserResponse::from), links)))
}

/// Fetch one user by id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "Unknown id", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = load(&state, *id).await?;
    Ok(web::Json(user.into()))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "Created", body = UserResponse),
        (status = 400, description = "Validation failure", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let user = User::register(payload.into_inner().into()).map_err(DomainError::from)?;
    state.users.add(&user).await.map_err(DomainError::from)?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Update a user's account data.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Validation failure", body = ApiError),
        (status = 404, description = "Unknown id", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let mut user = load(&state, *id).await?;
    user.update(payload.into_inner().into())
        .map_err(DomainError::from)?;
    state.users.update(&user).await.map_err(DomainError::from)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown id", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let removed = state.users.remove(*id).await.map_err(DomainError::from)?;
    if !removed {
        return Err(DomainError::not_found("user not found").into());
    }
    Ok(HttpResponse::NoContent().finish())
}
