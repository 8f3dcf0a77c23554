//! Infrastructure layer - external concerns

pub mod database;
pub mod role_service;

pub use database::{init_database, DatabaseConfig};
pub use role_service::HttpRoleServiceClient;
