use async_trait::async_trait;
use serde_json::Value;

use super::{RoleResult, SimulationOptions};
use crate::domain::RoleServiceError;

/// Outbound port to the role service.
///
/// There is no bulk lookup: callers pay one round trip per user.
#[async_trait]
pub trait RoleServiceClient: Send + Sync {
    /// Role for a single user. Any non-success response is an error.
    async fn fetch_role(
        &self,
        user_id: i32,
        options: &SimulationOptions,
    ) -> Result<RoleResult, RoleServiceError>;

    /// The role service's full role catalogue, passed through untouched.
    async fn list_roles(&self) -> Result<Value, RoleServiceError>;
}
