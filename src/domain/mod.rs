pub mod role;
pub mod user;

pub use role::{EnrichedUser, RoleResult, RoleServiceClient, SimulationOptions};
pub use user::{CreateUserDto, UpdateUserDto, User, UserRepositoryInterface};

// Re-export errors from shared for convenience
pub use crate::shared::{DomainError, EnrichmentError, RoleServiceError};

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
