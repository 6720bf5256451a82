use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::errors::AppResult;
use axum_helpers::pagination::{PageQuery, PageResponse};
use axum_helpers::response::{ApiResponse, messages};
use axum_helpers::ValidatedJson;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{UserRequest, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/username/{username}", get(get_user_by_username))
        .with_state(shared_service)
}

/// List users as a page envelope
///
/// GET /users?page=0&size=10&sortBy=id&sortDir=asc
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<PageResponse<UserResponse>>>> {
    let page = service.list_users(query).await?;
    Ok(Json(ApiResponse::ok("Users retrieved successfully", page)))
}

/// Create a new user
///
/// POST /users
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<UserRequest>,
) -> AppResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(messages::CREATED, user)),
    ))
}

/// Get a user by ID
///
/// GET /users/:id
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = service.get_user(id).await?;
    Ok(Json(ApiResponse::ok("User retrieved successfully", user)))
}

/// Get a user by username
///
/// GET /users/username/:username
async fn get_user_by_username<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(username): Path<String>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = service.get_user_by_username(&username).await?;
    Ok(Json(ApiResponse::ok("User retrieved successfully", user)))
}

/// Update a user
///
/// PUT /users/:id
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = service.update_user(id, input).await?;
    Ok(Json(ApiResponse::ok(messages::UPDATED, user)))
}

/// Delete a user
///
/// DELETE /users/:id
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    service.delete_user(id).await?;
    Ok(Json(ApiResponse::message(messages::DELETED)))
}
