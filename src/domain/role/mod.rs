//! Role data fetched from the external role service

pub mod client;
pub mod model;

pub use client::RoleServiceClient;
pub use model::{EnrichedUser, RoleResult, SimulationOptions};
