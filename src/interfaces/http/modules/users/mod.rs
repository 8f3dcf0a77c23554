//! Users module: CRUD plus the role-enriched listing

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
