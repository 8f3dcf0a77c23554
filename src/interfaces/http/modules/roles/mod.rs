//! Role catalogue passthrough

pub mod handlers;

pub use handlers::*;
