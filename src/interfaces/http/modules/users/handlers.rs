//! User API handlers
//!
//! Single-record CRUD delegates to `UserService`; the listing additionally
//! runs every user through `RoleEnricher`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use tracing::error;

use super::dto::{CreateUserRequest, EnrichedUserDto, ListUsersParams, UpdateUserRequest, UserDto};
use crate::application::{RoleEnricher, UserService};
use crate::domain::SimulationOptions;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{ApiError, ApiPath, ApiQuery, ErrorBody, ValidatedJson};

/// User handler state: concrete over `UserRepository` for Axum compatibility.
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService<UserRepository>>,
    pub enricher: Arc<RoleEnricher>,
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "All users, each with its role", body = Vec<EnrichedUserDto>),
        (status = 500, description = "A role lookup failed; nothing is returned", body = ErrorBody)
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    ApiQuery(params): ApiQuery<ListUsersParams>,
) -> Result<Json<Vec<EnrichedUserDto>>, ApiError> {
    let options = SimulationOptions::from(params);

    let users = state.user_service.list_users().await.map_err(|e| {
        error!(error = %e, "Error fetching users");
        ApiError::from(e)
    })?;

    let enriched = state.enricher.enrich_all(users, &options).await?;

    Ok(Json(enriched.into_iter().map(EnrichedUserDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserDto),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserDto::from(user)))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    match state.user_service.create_user(request.into()).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserDto::from(user)))),
        Err(e) => {
            error!(error = %e, "Error creating user");
            Err(e.into())
        }
    }
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state.user_service.update_user(id, request.into()).await?;
    Ok(Json(UserDto::from(user)))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
