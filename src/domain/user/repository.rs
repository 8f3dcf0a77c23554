use async_trait::async_trait;

use super::{CreateUserDto, UpdateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    /// All users in store-stable order (ascending id).
    async fn list_users(&self) -> DomainResult<Vec<User>>;
    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>>;

    async fn update_user(&self, id: i32, dto: UpdateUserDto) -> DomainResult<Option<User>>;
    /// Returns `false` when no row matched `id`.
    async fn delete_user(&self, id: i32) -> DomainResult<bool>;
}
