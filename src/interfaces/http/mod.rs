//! HTTP REST API interfaces
//!
//! - `common`: error responses and extractors shared by all handlers
//! - `modules`: per-resource handlers and DTOs, plus middleware
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, AppState};
