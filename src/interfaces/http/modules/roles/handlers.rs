use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::error;

use crate::domain::RoleServiceClient;
use crate::interfaces::http::common::{ApiError, ErrorBody};

#[derive(Clone)]
pub struct RoleHandlerState {
    pub role_client: Arc<dyn RoleServiceClient>,
}

#[utoipa::path(
    get,
    path = "/roles",
    tag = "Roles",
    responses(
        (status = 200, description = "Role list as returned by the role service", body = serde_json::Value),
        (status = 500, description = "Role service unreachable or failing", body = ErrorBody)
    )
)]
pub async fn list_roles(State(state): State<RoleHandlerState>) -> Result<Json<Value>, ApiError> {
    state.role_client.list_roles().await.map(Json).map_err(|e| {
        error!(error = %e, "Error fetching roles");
        ApiError::internal("Failed to fetch roles")
    })
}
