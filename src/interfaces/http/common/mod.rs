//! Shared HTTP building blocks: error responses and extractors

pub mod api_error;
pub mod path;
pub mod query;
pub mod validated_json;

pub use api_error::{ApiError, ErrorBody};
pub use path::ApiPath;
pub use query::ApiQuery;
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
