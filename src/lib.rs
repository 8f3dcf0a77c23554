//! # User Directory
//!
//! HTTP service managing user records in a relational store. Listings are
//! enriched with role data fetched, user by user, from an external role
//! service.
//!
//! ## Architecture
//!
//! - **domain**: Core entities, ports (repository and role service traits)
//! - **application**: User CRUD service and the role enrichment orchestrator
//! - **infrastructure**: SeaORM persistence and the reqwest role service client
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Error types and shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
