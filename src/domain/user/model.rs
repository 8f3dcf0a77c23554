use chrono::{DateTime, Utc};

/// User model
///
/// `id` is assigned by the store on insert and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
