//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{CreateUserDto, EnrichedUser, SimulationOptions, UpdateUserDto, User};

/// User API representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// User with the role payload reported by the role service
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrichedUserDto {
    #[serde(flatten)]
    pub user: UserDto,
    /// Opaque role payload, forwarded as received
    #[schema(value_type = Object)]
    pub role: Value,
}

impl From<EnrichedUser> for EnrichedUserDto {
    fn from(e: EnrichedUser) -> Self {
        Self {
            user: UserDto::from(e.user),
            role: e.role.into_inner(),
        }
    }
}

/// Create user request
///
/// Only size limits are checked here. Trimming and the email format check
/// belong to `UserService`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub name: String,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub email: String,
}

impl From<CreateUserRequest> for CreateUserDto {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
        }
    }
}

/// Update user request; omitted fields keep their stored value
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUserDto {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
        }
    }
}

/// Role service simulation controls, forwarded to every role lookup
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersParams {
    /// Ask the role service to fail
    pub error: Option<String>,
    /// Ask the role service to delay its answer (milliseconds)
    pub latence: Option<String>,
}

impl From<ListUsersParams> for SimulationOptions {
    fn from(p: ListUsersParams) -> Self {
        Self {
            error: p.error,
            latence: p.latence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoleResult;
    use serde_json::json;

    #[test]
    fn enriched_user_serializes_flat() {
        let now = Utc::now();
        let enriched = EnrichedUser {
            user: User {
                id: 1,
                name: "Ada".into(),
                email: "ada@example.com".into(),
                created_at: now,
                updated_at: now,
            },
            role: RoleResult(json!({ "name": "admin" })),
        };

        let value = serde_json::to_value(EnrichedUserDto::from(enriched)).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["role"], json!({ "name": "admin" }));
        assert!(value.get("user").is_none());
    }
}
