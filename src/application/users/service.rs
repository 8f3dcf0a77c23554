//! User management service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};
use validator::ValidateEmail;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, UpdateUserDto, User, UserRepositoryInterface,
};

/// User service: CRUD use-cases over the user store.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Create a user. Nothing is persisted when validation fails.
    pub async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let dto = CreateUserDto {
            name: normalize_name(&dto.name)?,
            email: normalize_email(&dto.email)?,
        };

        let user = self.repo.create_user(dto).await?;
        info!(user_id = user.id, email = %user.email, "User created");
        Ok(user)
    }

    pub async fn update_user(&self, id: i32, dto: UpdateUserDto) -> DomainResult<User> {
        let dto = UpdateUserDto {
            name: dto.name.as_deref().map(normalize_name).transpose()?,
            email: dto.email.as_deref().map(normalize_email).transpose()?,
        };

        match self.repo.update_user(id, dto).await? {
            Some(user) => {
                info!(user_id = user.id, "User updated");
                Ok(user)
            }
            None => {
                warn!(user_id = id, "User not found for update");
                Err(DomainError::user_not_found(id))
            }
        }
    }

    pub async fn delete_user(&self, id: i32) -> DomainResult<()> {
        if self.repo.delete_user(id).await? {
            info!(user_id = id, "User deleted");
            Ok(())
        } else {
            warn!(user_id = id, "User not found for deletion");
            Err(DomainError::user_not_found(id))
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_user(&self, id: i32) -> DomainResult<User> {
        self.repo.get_user_by_id(id).await?.ok_or_else(|| {
            warn!(user_id = id, "User not found");
            DomainError::user_not_found(id)
        })
    }

    /// Every stored user, in store order.
    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.repo.list_users().await
    }
}

// ── Helpers ─────────────────────────────────────────────────────

fn normalize_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation("name must not be empty".into()));
    }
    Ok(name.to_string())
}

fn normalize_email(email: &str) -> DomainResult<String> {
    let email = email.trim();
    if !email.validate_email() {
        return Err(DomainError::Validation("email must be a valid address".into()));
    }
    Ok(email.to_string())
}
