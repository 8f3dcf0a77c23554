//! Role enrichment of user listings

pub mod orchestrator;

pub use orchestrator::RoleEnricher;
