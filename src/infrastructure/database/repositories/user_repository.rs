use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, UpdateUserDto, User, UserRepositoryInterface,
};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();

        let new_user = user::ActiveModel {
            name: Set(dto.name),
            email: Set(dto.email),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = new_user.insert(&self.db).await.map_err(db_err)?;
        Ok(user_model_to_domain(model))
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn update_user(&self, id: i32, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        if dto.is_empty() {
            return Ok(Some(user_model_to_domain(existing)));
        }

        let mut active: user::ActiveModel = existing.into();

        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(email) = dto.email {
            active.email = Set(email);
        }

        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;

        Ok(Some(user_model_to_domain(updated)))
    }

    async fn delete_user(&self, id: i32) -> DomainResult<bool> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}
