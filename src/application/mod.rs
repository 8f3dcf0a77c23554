pub mod enrichment;
pub mod users;

pub use enrichment::RoleEnricher;
pub use users::UserService;
